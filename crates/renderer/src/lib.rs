//! Visualization core for a rule-based grid-rewriting simulation.
//!
//! The simulation mutates a [`Board`] of byte tile indices; this crate
//! turns that array into pixels through a GPU palette lookup, frame after
//! frame. The overall flow is:
//!
//! ```text
//!   simulation ──▶ Board (bytes) ──▶ update_tiles ──▶ screen texture (R8)
//!                  Palette (RGBA) ──▶ update_colours ─▶ palette texture (1D×256)
//!                                                          │
//!   frame loop ──▶ render() ──▶ full-surface triangle ──▶ two-stage lookup ──▶ surface
//! ```
//!
//! [`BoardRenderer`] owns every GPU handle (screen texture, palette
//! texture, pipeline, bind group) in one resource-lifetime struct; the
//! bind group is rebuilt whenever the screen texture is replaced on a
//! board resize, tracked by a generation counter so a draw can never
//! observe a freed texture. [`run_windowed`] wraps the renderer in a
//! cooperative winit redraw loop carrying an explicit [`CancelToken`].

mod board;
mod error;
mod gpu;
mod palette;
mod scheduler;
mod window;

pub use board::{Board, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
pub use error::RenderError;
pub use gpu::BoardRenderer;
pub use palette::{Palette, PaletteError, Rgba, PALETTE_SIZE};
pub use scheduler::{CancelToken, FrameScheduler};
pub use window::run_windowed;

/// Options handed to the windowed loop.
#[derive(Clone, Debug)]
pub struct ViewOptions {
    /// Window title.
    pub title: String,
    /// Initial window size in physical pixels.
    pub window_size: (u32, u32),
    /// Initial palette, applied before the first frame. May be empty.
    pub colours: Vec<Rgba>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            title: "board".to_string(),
            window_size: (640, 640),
            colours: Vec::new(),
        }
    }
}
