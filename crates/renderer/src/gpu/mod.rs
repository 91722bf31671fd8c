//! GPU orchestration for the tile-board renderer.
//!
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   reconfigure the swapchain when the window resizes.
//! - `textures` materialises the two images the shader samples: the
//!   single-channel screen texture mirroring the board and the fixed
//!   256-entry 1D palette texture.
//! - `pipeline` holds the fixed shading program, its bind group layout,
//!   and the sampler, and builds bind groups against live textures.
//! - `binding` tracks which screen-texture generation the current bind
//!   group was built against, so a draw can never observe a freed texture.
//! - `state` glues everything together into [`BoardRenderer`], the API the
//!   windowed loop and embedders drive.
//!
//! [`BoardRenderer`]: crate::BoardRenderer

mod binding;
mod context;
mod pipeline;
mod state;
mod textures;

pub use state::BoardRenderer;
