//! Error taxonomy for the renderer's runtime operations.
//!
//! Creation-time failures (surface, adapter, device, pipeline) surface as
//! `anyhow::Error` from [`BoardRenderer::new`]; everything after that is
//! typed here.
//!
//! [`BoardRenderer::new`]: crate::BoardRenderer::new

use thiserror::Error;

use crate::palette::PaletteError;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The bind group references a screen texture that has since been
    /// replaced. A programming fault: resize must rebuild the bind group
    /// before any draw can run.
    #[error(
        "bind group built against screen texture generation {bound}, \
         but generation {current} is live"
    )]
    StaleBinding { bound: u64, current: u64 },

    /// `update_tiles` was called with a board whose dimensions do not
    /// match the screen texture. Callers must resize the renderer first.
    #[error(
        "board is {board_width}x{board_height} but screen texture is \
         {screen_width}x{screen_height}; resize the renderer first"
    )]
    SizeMismatch {
        board_width: u32,
        board_height: u32,
        screen_width: u32,
        screen_height: u32,
    },

    /// Recoverable per-frame surface failure; the frame is dropped and the
    /// next scheduled redraw retries.
    #[error("surface error: {0}")]
    Surface(wgpu::SurfaceError),

    /// The device is no longer usable. Halt the frame loop; a full
    /// re-initialisation is required.
    #[error("GPU device lost; renderer must be re-initialised")]
    DeviceLost,

    /// Operation attempted after [`BoardRenderer::dispose`].
    ///
    /// [`BoardRenderer::dispose`]: crate::BoardRenderer::dispose
    #[error("renderer has been disposed")]
    Disposed,

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            // Out-of-memory on frame acquisition is not a dropped frame;
            // treat it as the device being gone.
            wgpu::SurfaceError::OutOfMemory => RenderError::DeviceLost,
            other => RenderError::Surface(other),
        }
    }
}

impl RenderError {
    /// True for errors that should stop the frame scheduler rather than be
    /// retried next frame.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::DeviceLost | RenderError::StaleBinding { .. } | RenderError::Disposed
        )
    }

    /// True when the swapchain is gone and stays gone until the surface is
    /// reconfigured. Retrying without reconfiguring would fail every frame.
    pub fn requires_reconfigure(&self) -> bool {
        matches!(
            self,
            RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_memory_maps_to_device_lost() {
        let err = RenderError::from(wgpu::SurfaceError::OutOfMemory);
        assert!(matches!(err, RenderError::DeviceLost));
        assert!(err.is_fatal());
    }

    #[test]
    fn timeout_is_a_recoverable_surface_error() {
        let err = RenderError::from(wgpu::SurfaceError::Timeout);
        assert!(matches!(err, RenderError::Surface(_)));
        assert!(!err.is_fatal());
        assert!(!err.requires_reconfigure());
    }

    #[test]
    fn lost_and_outdated_demand_surface_reconfiguration() {
        for surface_err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            let err = RenderError::from(surface_err);
            assert!(err.requires_reconfigure());
            assert!(!err.is_fatal());
        }
        assert!(!RenderError::DeviceLost.requires_reconfigure());
    }

    #[test]
    fn palette_rejection_is_recoverable() {
        let err = RenderError::from(PaletteError::OutOfRange { len: 257 });
        assert!(!err.is_fatal());
    }
}
