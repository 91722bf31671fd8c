//! Generation tracking between the screen texture and the bind group.
//!
//! A bind group is only valid while every texture it references is alive.
//! Replacing the screen texture bumps the live generation; until the bind
//! group is rebuilt the pairing is stale and drawing with it would read a
//! freed texture.

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BindingGeneration {
    current: u64,
    bound: u64,
}

impl BindingGeneration {
    /// Records that the screen texture was replaced.
    pub fn replace_texture(&mut self) {
        self.current += 1;
    }

    /// Records that the bind group was rebuilt against the live texture.
    pub fn rebind(&mut self) {
        self.bound = self.current;
    }

    pub fn is_stale(&self) -> bool {
        self.bound != self.current
    }

    /// `(bound, current)` pair for diagnostics.
    pub fn generations(&self) -> (u64, u64) {
        (self.bound, self.current)
    }
}
