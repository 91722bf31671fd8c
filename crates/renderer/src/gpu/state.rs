use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, warn};
use winit::dpi::PhysicalSize;

use crate::board::Board;
use crate::error::RenderError;
use crate::palette::{Palette, Rgba};

use super::binding::BindingGeneration;
use super::context::GpuContext;
use super::pipeline::BoardPipeline;
use super::textures::{PaletteTexture, ScreenTexture};

/// Lifecycle phase. `Resizing` is transient inside [`BoardRenderer::resize_board`];
/// `Disposed` is terminal and rejects every further operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Resizing,
    Disposed,
}

/// CPU staging for the screen texture: the latest tile snapshot plus a
/// dirty flag so a frame with no intervening update re-uploads nothing.
struct TileSnapshot {
    bytes: Vec<u8>,
    dirty: bool,
}

impl TileSnapshot {
    fn from_board(board: &Board) -> Self {
        Self {
            bytes: board.tiles().to_vec(),
            dirty: true,
        }
    }

    /// Zero-filled snapshot for a freshly resized board.
    fn reset(&mut self, len: usize) {
        self.bytes = vec![0; len];
        self.dirty = true;
    }

    fn copy_from(&mut self, tiles: &[u8]) {
        self.bytes.copy_from_slice(tiles);
        self.dirty = true;
    }

    /// Returns the bytes to upload if anything changed since the last
    /// call, clearing the flag.
    fn take_dirty(&mut self) -> Option<&[u8]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.bytes)
        } else {
            None
        }
    }
}

/// Owns the full GPU resource set for one presentation surface and exposes
/// the renderer lifecycle: resize, update-tiles, update-colours, render,
/// dispose.
///
/// All mutation happens on the caller's thread; commands are enqueued into
/// the device queue and execute asynchronously. Within one render the tile
/// upload is enqueued before the draw in the same submission, so a frame
/// always observes the snapshot it was scheduled with.
pub struct BoardRenderer {
    context: GpuContext,
    pipeline: BoardPipeline,
    screen: ScreenTexture,
    palette_texture: PaletteTexture,
    bind_group: wgpu::BindGroup,
    binding: BindingGeneration,
    palette: Palette,
    tiles: TileSnapshot,
    phase: Phase,
}

impl BoardRenderer {
    /// Binds to the caller's window, requests a device, and builds the
    /// full resource set at the board's current dimensions. Any creation
    /// failure is fatal; no partial renderer is returned.
    pub fn new<T>(target: &T, surface_size: PhysicalSize<u32>, board: &Board) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, surface_size)?;
        let pipeline = BoardPipeline::new(&context.device, context.surface_format);
        let screen = ScreenTexture::new(&context.device, board.width(), board.height());
        let palette_texture = PaletteTexture::new(&context.device);
        let bind_group = pipeline.bind_group(&context.device, &screen, &palette_texture);

        // Seed both textures so the first frame samples defined data.
        let palette = Palette::new();
        palette_texture.upload(&context.queue, palette.as_bytes());
        let tiles = TileSnapshot::from_board(board);

        debug!(
            width = board.width(),
            height = board.height(),
            "board renderer initialised"
        );

        Ok(Self {
            context,
            pipeline,
            screen,
            palette_texture,
            bind_group,
            binding: BindingGeneration::default(),
            palette,
            tiles,
            phase: Phase::Ready,
        })
    }

    /// Current screen texture dimensions (always equal to the board
    /// dimensions the renderer was last resized to).
    pub fn board_dimensions(&self) -> (u32, u32) {
        (self.screen.width, self.screen.height)
    }

    /// Current swapchain size in physical pixels.
    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Reconfigures the swapchain after a window resize. Also the recovery
    /// path for `SurfaceError::Lost`/`Outdated`.
    pub fn resize_surface(&mut self, new_size: PhysicalSize<u32>) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.context.resize(new_size);
    }

    /// Replaces the screen texture at the new board dimensions, rebuilds
    /// the bind group, resets the tile snapshot to zeros, and renders
    /// immediately so the displayed surface refreshes at the new size.
    ///
    /// Synchronous with respect to subsequent renders: the bind group is
    /// valid again before this returns, so no draw can observe the freed
    /// texture.
    pub fn resize_board(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.ensure_live()?;
        let max_dimension = self.context.max_texture_dimension();
        if width > max_dimension || height > max_dimension {
            warn!(
                width,
                height,
                max = max_dimension,
                "board resize exceeds GPU max texture dimension; keeping previous size"
            );
            return Ok(());
        }

        self.phase = Phase::Resizing;
        // The old texture handle drops here; the queue keeps it alive
        // until previously submitted work has finished with it.
        self.screen = ScreenTexture::new(&self.context.device, width, height);
        self.binding.replace_texture();
        self.bind_group =
            self.pipeline
                .bind_group(&self.context.device, &self.screen, &self.palette_texture);
        self.binding.rebind();

        self.tiles
            .reset(self.screen.width as usize * self.screen.height as usize);
        self.phase = Phase::Ready;

        debug!(width, height, "screen texture rebuilt");
        self.render_lossy()
    }

    /// Replaces the palette (up to 256 entries; longer inputs are rejected
    /// and leave the current palette untouched), uploads the full table
    /// into the palette texture, and renders immediately so the new
    /// mapping is visible without waiting for the next scheduled frame.
    pub fn update_colours(&mut self, colours: &[Rgba]) -> Result<(), RenderError> {
        self.ensure_live()?;
        self.palette.set_colours(colours)?;
        self.palette_texture
            .upload(&self.context.queue, self.palette.as_bytes());
        self.render_lossy()
    }

    /// Snapshots the caller's board and renders immediately. The board
    /// must already match the screen texture dimensions; call
    /// [`resize_board`](Self::resize_board) first if it does not.
    pub fn update_tiles(&mut self, board: &Board) -> Result<(), RenderError> {
        self.ensure_live()?;
        if board.width() != self.screen.width || board.height() != self.screen.height {
            return Err(RenderError::SizeMismatch {
                board_width: board.width(),
                board_height: board.height(),
                screen_width: self.screen.width,
                screen_height: self.screen.height,
            });
        }
        self.tiles.copy_from(board.tiles());
        self.render_lossy()
    }

    /// Records and submits one frame: acquire the current surface image,
    /// enqueue the tile upload if the snapshot is dirty, draw the
    /// full-surface triangle, submit. Fire-and-forget; never waits for GPU
    /// completion.
    pub fn render(&mut self) -> Result<(), RenderError> {
        self.ensure_live()?;
        if self.binding.is_stale() {
            let (bound, current) = self.binding.generations();
            return Err(RenderError::StaleBinding { bound, current });
        }

        let frame = self
            .context
            .surface
            .get_current_texture()
            .map_err(RenderError::from)?;

        if let Some(bytes) = self.tiles.take_dirty() {
            // Enqueued ahead of the draw below; both land in the same
            // submission, so the draw sees this frame's snapshot.
            self.screen.upload(&self.context.queue, bytes);
        }

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("board encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("board pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Enters the terminal phase: all further operations are rejected and
    /// the frame loop stops re-registering. GPU handles are released when
    /// the renderer drops.
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        self.phase = Phase::Disposed;
        debug!("board renderer disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    /// Render, but treat transient surface hiccups (`Timeout` and the like)
    /// as a dropped frame: the update that triggered this render has
    /// already been staged and the next scheduled redraw will present it.
    /// `Lost`/`Outdated` propagate; they stay broken until the caller
    /// reconfigures the surface.
    fn render_lossy(&mut self) -> Result<(), RenderError> {
        match self.render() {
            Ok(()) => Ok(()),
            Err(err) if err.requires_reconfigure() => Err(err),
            Err(RenderError::Surface(err)) => {
                warn!(error = ?err, "dropped frame; retrying on next scheduled redraw");
                Ok(())
            }
            Err(fatal) => Err(fatal),
        }
    }

    fn ensure_live(&self) -> Result<(), RenderError> {
        match self.phase {
            Phase::Disposed => Err(RenderError::Disposed),
            Phase::Ready | Phase::Resizing => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_board_bytes() {
        let mut board = Board::new(2, 2);
        board.tiles_mut().copy_from_slice(&[0, 1, 2, 3]);
        let mut snapshot = TileSnapshot::from_board(&board);
        assert_eq!(snapshot.take_dirty(), Some(&[0u8, 1, 2, 3][..]));
    }

    #[test]
    fn unchanged_snapshot_uploads_nothing() {
        let board = Board::new(2, 2);
        let mut snapshot = TileSnapshot::from_board(&board);
        assert!(snapshot.take_dirty().is_some());
        assert!(snapshot.take_dirty().is_none());

        snapshot.copy_from(board.tiles());
        assert!(snapshot.take_dirty().is_some());
    }

    #[test]
    fn reset_yields_a_dirty_zero_snapshot() {
        let mut board = Board::new(2, 2);
        board.tiles_mut().fill(9);
        let mut snapshot = TileSnapshot::from_board(&board);
        snapshot.take_dirty();

        snapshot.reset(6);
        assert_eq!(snapshot.take_dirty(), Some(&[0u8; 6][..]));
    }
}
