//! Cooperative frame scheduling: the redraw chain and its cancellation.
//!
//! The display loop re-registers itself for the next frame after every
//! render. [`FrameScheduler::arm`] is the single point where that chain is
//! extended, so cancelling the shared [`CancelToken`] is guaranteed to
//! break the loop at the next frame boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for the frame loop. Cloning yields another
/// handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the frame loop stop re-registering. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Bookkeeping for the self-rescheduling redraw chain.
pub struct FrameScheduler {
    token: CancelToken,
    frames_scheduled: u64,
}

impl FrameScheduler {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            frames_scheduled: 0,
        }
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Asks permission to schedule the next frame. Returns `false` once
    /// the token is cancelled, after which the chain must not be extended.
    pub fn arm(&mut self) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.frames_scheduled += 1;
        true
    }

    /// Number of frames the chain has scheduled so far.
    pub fn frames_scheduled(&self) -> u64 {
        self.frames_scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arms_until_cancelled() {
        let token = CancelToken::new();
        let mut scheduler = FrameScheduler::new(token.clone());
        assert!(scheduler.arm());
        assert!(scheduler.arm());
        assert_eq!(scheduler.frames_scheduled(), 2);

        token.cancel();
        assert!(!scheduler.arm());
        assert_eq!(scheduler.frames_scheduled(), 2);
    }

    #[test]
    fn cancellation_is_visible_through_clones() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
