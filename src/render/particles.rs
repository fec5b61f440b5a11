use super::helpers::{uniform_buffer, uniform_layout_entry, HDR_FORMAT};
use biolumen_core::{Particle, ParticleClass, ParticleField};

/// Per-instance attributes; the shader expands each into a 6-vertex quad.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) random_phase: [f32; 4],
    pub(crate) kind: [f32; 4], // x: 0 head, 1 tentacle
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        let kind = match p.class {
            ParticleClass::Head => 0.0,
            ParticleClass::Tentacle => 1.0,
        };
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, p.size],
            random_phase: [p.random.x, p.random.y, p.random.z, p.phase],
            kind: [kind, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct JellyUniforms {
    pub(crate) view: [[f32; 4]; 4],
    pub(crate) proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color_time: [f32; 4],
    pub(crate) shape: [f32; 4], // tension, core radius, tentacle length, spread
    pub(crate) viewport: [f32; 4], // width, height, point size scale
}

pub(crate) struct ParticleResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) instance_capacity: u32,
    pub(crate) instance_count: u32,
}

fn instance_buffer(device: &wgpu::Device, capacity: u32) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("particle_instances"),
        size: (capacity.max(1) as u64) * std::mem::size_of::<ParticleInstance>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_particle_resources(device: &wgpu::Device) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("jelly_shader"),
        source: wgpu::ShaderSource::Wgsl(biolumen_core::JELLY_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("jelly_bgl"),
        entries: &[uniform_layout_entry(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("jelly_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let attrs = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];
    let additive = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("jelly_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_particle"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &attrs,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_particle"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(additive),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = uniform_buffer::<JellyUniforms>(device, "jelly_uniforms");
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("jelly_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    ParticleResources {
        pipeline,
        uniform_buffer,
        bind_group,
        instance_buffer: instance_buffer(device, 1),
        instance_capacity: 1,
        instance_count: 0,
    }
}

impl ParticleResources {
    /// Replace the instance data, growing the buffer when the field got
    /// larger than anything uploaded before.
    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, field: &ParticleField) {
        let instances: Vec<ParticleInstance> =
            field.particles().iter().map(ParticleInstance::from).collect();
        let count = instances.len() as u32;
        if count > self.instance_capacity {
            self.instance_buffer = instance_buffer(device, count);
            self.instance_capacity = count;
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.instance_count = count;
    }
}
