use crate::constants::{CLEAR_COLOR, HALO_STRENGTH};
use biolumen_core::{Camera, FrameUniforms, ParticleField, POINT_SIZE_SCALE};
use glam::Mat4;
use web_sys as web;

mod backdrop;
mod helpers;
mod particles;
mod post;
mod targets;

use backdrop::{create_backdrop_resources, BackdropResources, BackdropUniforms};
use particles::{create_particle_resources, JellyUniforms, ParticleResources};
use post::{PostBindGroups, PostResources};
use targets::RenderTargets;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    particles: ParticleResources,
    backdrop: BackdropResources,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {:?}", e))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let particles = create_particle_resources(&device);
        let backdrop = create_backdrop_resources(&device);
        let post = post::create_post_resources(&device, format);
        let post_groups = PostBindGroups::new(&device, &post, &linear_sampler, &targets);
        log::info!("[gpu] surface {width}x{height} {format:?}");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particles,
            backdrop,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
        })
    }

    /// Upload the static particle attributes. Called only when the field was
    /// regenerated; colour and shape changes travel through uniforms.
    pub fn upload_field(&mut self, field: &ParticleField) {
        self.particles.upload(&self.device, &self.queue, field);
        log::info!("[gpu] uploaded {} particle instances", self.particles.instance_count);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups =
                PostBindGroups::new(&self.device, &self.post, &self.linear_sampler, &self.targets);
        }
    }

    /// Reconfigure after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, frame: &FrameUniforms, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        let view_m = camera.view_matrix();
        let proj_m = camera.projection_matrix();
        let model_m = Mat4::from_rotation_y(frame.spin);

        let ju = JellyUniforms {
            view: view_m.to_cols_array_2d(),
            proj: proj_m.to_cols_array_2d(),
            model: model_m.to_cols_array_2d(),
            color_time: [frame.color[0], frame.color[1], frame.color[2], frame.time],
            shape: [
                frame.tension,
                frame.shape.core_radius,
                frame.shape.tentacle_length,
                frame.shape.tentacle_spread,
            ],
            viewport: [self.width as f32, self.height as f32, POINT_SIZE_SCALE, 0.0],
        };
        self.queue
            .write_buffer(&self.particles.uniform_buffer, 0, bytemuck::bytes_of(&ju));

        let bu = BackdropUniforms {
            inv_view_proj: (proj_m * view_m).inverse().to_cols_array_2d(),
            tint: [frame.color[0], frame.color[1], frame.color[2], HALO_STRENGTH],
            params: [frame.time, frame.tension, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.backdrop.uniform_buffer, 0, bytemuck::bytes_of(&bu));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let clear = wgpu::Color {
            r: CLEAR_COLOR[0],
            g: CLEAR_COLOR[1],
            b: CLEAR_COLOR[2],
            a: 1.0,
        };

        // Pass 1: backdrop then additive particles into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.backdrop.pipeline);
            rpass.set_bind_group(0, &self.backdrop.bind_group, &[]);
            rpass.draw(0..3, 0..1);

            if self.particles.instance_count > 0 {
                rpass.set_pipeline(&self.particles.pipeline);
                rpass.set_bind_group(0, &self.particles.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.particles.instance_buffer.slice(..));
                rpass.draw(0..6, 0..self.particles.instance_count);
            }
        }

        let [bw, bh] = self.targets.bloom_size;
        let res = [bw as f32, bh as f32];
        let uniforms = &self.post.uniforms;
        post::write_post_uniforms(&self.queue, &uniforms.main, res, frame.time, frame.tension, [0.0, 0.0]);
        post::write_post_uniforms(&self.queue, &uniforms.blur_h, res, frame.time, frame.tension, [1.0, 0.0]);
        post::write_post_uniforms(&self.queue, &uniforms.blur_v, res, frame.time, frame.tension, [0.0, 1.0]);

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h_from_a,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v_from_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            clear,
            &self.post.composite_pipeline,
            &self.post_groups.hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
