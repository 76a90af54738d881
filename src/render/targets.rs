use super::helpers;
use wgpu;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets for the render pipeline.
///
/// A full-resolution HDR scene color plus two half-resolution bloom
/// ping-pong textures. Textures are held so their views stay valid.
pub(crate) struct RenderTargets {
    _hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, usage);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, usage);
        Self {
            _hdr_tex: hdr_tex,
            hdr_view,
            _bloom_a: bloom_a,
            bloom_a_view,
            _bloom_b: bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
