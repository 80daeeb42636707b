//! GPU copy of the CPU pixel canvas.

use crate::surface::{PixelCanvas, RenderSurface};

/// A sampled texture mirroring a [`PixelCanvas`], re-uploaded every frame.
///
/// The canvas stores sRGB-encoded bytes. When the swapchain is sRGB the
/// texture is too, so sampling decodes to linear and the store re-encodes;
/// otherwise the bytes pass through untouched.
pub struct CanvasTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl CanvasTexture {
    /// Texture format matching the presentation format's color encoding.
    #[must_use]
    pub fn format_for(
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::TextureFormat {
        if surface_format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        }
    }

    /// Allocate a texture of the given size. Zero dimensions are bumped to
    /// one texel since wgpu rejects empty textures.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    /// Whether the texture already has the canvas's dimensions.
    #[must_use]
    pub fn matches(&self, canvas: &PixelCanvas) -> bool {
        let (width, height) = canvas.dimensions();
        (self.width, self.height) == (width, height)
    }

    /// Copy the canvas pixels into the texture. A canvas of a different
    /// size is skipped; the caller reallocates first.
    pub fn upload(&self, queue: &wgpu::Queue, canvas: &PixelCanvas) {
        if !self.matches(canvas) {
            return;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
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
