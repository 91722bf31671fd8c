//! The two images the shading program samples: the board mirror and the
//! palette lookup table.

use crate::palette::PALETTE_SIZE;

/// Single-channel unsigned-normalised mirror of the board. One texel per
/// cell; dimensions always equal the board's.
pub(crate) struct ScreenTexture {
    // referenced through `view`; kept so the allocation lives exactly as
    // long as this struct
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl ScreenTexture {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("screen"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
            width,
            height,
        }
    }

    /// Full overwrite with the latest tile snapshot, one byte per texel.
    /// `tiles.len()` must equal `width * height`.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, tiles: &[u8]) {
        debug_assert_eq!(tiles.len(), self.width as usize * self.height as usize);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self._texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            tiles,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }
}

/// 1-dimensional, fixed 256-entry RGBA lookup table. Allocated once per
/// renderer; only its contents change.
pub(crate) struct PaletteTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl PaletteTexture {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("colours"),
            size: wgpu::Extent3d {
                width: PALETTE_SIZE as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D1,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }

    /// Full overwrite of all 256 entries; `bytes.len()` must be
    /// `4 * PALETTE_SIZE`.
    pub(crate) fn upload(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), 4 * PALETTE_SIZE);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self._texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * PALETTE_SIZE as u32),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width: PALETTE_SIZE as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }
}
