use super::helpers::{create_color_texture, HDR_FORMAT};

/// Offscreen colour targets: the full-resolution HDR scene plus two
/// half-resolution bloom ping-pong buffers.
pub(crate) struct RenderTargets {
    _hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    _bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    _bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: [u32; 2],
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) = create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT);
        let (bloom_b, bloom_b_view) = create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT);
        Self {
            _hdr_tex: hdr_tex,
            hdr_view,
            _bloom_a: bloom_a,
            bloom_a_view,
            _bloom_b: bloom_b,
            bloom_b_view,
            bloom_size: [bw, bh],
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
