use super::helpers::{make_fullscreen_pipeline, uniform_buffer, uniform_layout_entry, HDR_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BackdropUniforms {
    pub(crate) inv_view_proj: [[f32; 4]; 4],
    pub(crate) tint: [f32; 4],   // rgb, halo strength
    pub(crate) params: [f32; 4], // time, tension
}

/// Fullscreen pass that paints the dark water and a faint halo behind the
/// specimen before the particles are added on top.
pub(crate) struct BackdropResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_backdrop_resources(device: &wgpu::Device) -> BackdropResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("backdrop_shader"),
        source: wgpu::ShaderSource::Wgsl(biolumen_core::BACKDROP_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("backdrop_bgl"),
        entries: &[uniform_layout_entry(0, wgpu::ShaderStages::FRAGMENT)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("backdrop_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline =
        make_fullscreen_pipeline(device, "backdrop_pipeline", &pl, &shader, "fs_backdrop", HDR_FORMAT, None);
    let uniform_buffer = uniform_buffer::<BackdropUniforms>(device, "backdrop_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("backdrop_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    BackdropResources {
        pipeline,
        uniform_buffer,
        bind_group,
    }
}
