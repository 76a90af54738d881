use crate::geometry::{self, Capacities, MeshVertex, PointInstance};
use crate::scene::Scene;
use web_sys as web;

mod helpers;
mod mesh;
mod points;
mod post;
mod targets;

use mesh::{create_mesh_resources, MeshResources};
use points::{create_point_resources, PointResources};
use post::{PostBindGroups, PostResources};
use targets::{bloom_size, RenderTargets, HDR_FORMAT};

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    points: PointResources,
    lines: MeshResources,
    rings: MeshResources,

    // Post-processing resources
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    // Scratch buffers reused every frame
    point_scratch: Vec<PointInstance>,
    line_scratch: Vec<MeshVertex>,
    ring_scratch: Vec<MeshVertex>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        capacities: Capacities,
        background: [f32; 3],
    ) -> anyhow::Result<Self> {
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
                    // Default limits on web; older WebGPU impls reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
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

        let globals_layout = helpers::uniform_layout(&device, "globals_bgl");
        let globals_buffer = helpers::create_buffer(
            &device,
            "globals",
            std::mem::size_of::<geometry::SceneUniforms>(),
            wgpu::BufferUsages::UNIFORM,
        );
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let points =
            create_point_resources(&device, &globals_layout, HDR_FORMAT, capacities.points);
        let lines = create_mesh_resources(
            &device,
            &globals_layout,
            HDR_FORMAT,
            wgpu::PrimitiveTopology::LineList,
            "connection_lines",
            capacities.line_vertices,
        );
        let rings = create_mesh_resources(
            &device,
            &globals_layout,
            HDR_FORMAT,
            wgpu::PrimitiveTopology::TriangleList,
            "energy_rings",
            capacities.ring_vertices,
        );

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, HDR_FORMAT, format);
        let post_groups = post.bind_groups(&device, &targets);

        log::info!(
            "[gpu] surface {}x{} {:?}; capacity points={} lines={} rings={}",
            width,
            height,
            format,
            capacities.points,
            capacities.line_vertices,
            capacities.ring_vertices
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            point_scratch: Vec::with_capacity(points.capacity),
            line_scratch: Vec::with_capacity(lines.capacity),
            ring_scratch: Vec::with_capacity(rings.capacity),
            points,
            lines,
            rings,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: background[0] as f64,
                g: background[1] as f64,
                b: background[2] as f64,
                a: 1.0,
            },
        })
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

            // Recreate offscreen render targets and the bind groups that sample them
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
        }
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms =
            geometry::scene_uniforms(scene, [self.width as f32, self.height as f32]);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&uniforms));

        geometry::pack_rings(scene, &mut self.ring_scratch);
        geometry::pack_lines(scene, &mut self.line_scratch);
        geometry::pack_points(scene, &mut self.point_scratch);
        let ring_count = upload(
            &self.queue,
            &self.rings.vertices,
            &self.ring_scratch,
            self.rings.capacity,
        );
        let line_count = upload(
            &self.queue,
            &self.lines.vertices,
            &self.line_scratch,
            self.lines.capacity,
        );
        let point_count = upload(
            &self.queue,
            &self.points.instances,
            &self.point_scratch,
            self.points.capacity,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            if ring_count > 0 {
                rpass.set_pipeline(&self.rings.pipeline);
                rpass.set_vertex_buffer(0, self.rings.vertices.slice(..));
                rpass.draw(0..ring_count, 0..1);
            }
            if line_count > 0 {
                rpass.set_pipeline(&self.lines.pipeline);
                rpass.set_vertex_buffer(0, self.lines.vertices.slice(..));
                rpass.draw(0..line_count, 0..1);
            }
            if point_count > 0 {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_vertex_buffer(0, self.points.instances.slice(..));
                rpass.draw(0..6, 0..point_count);
            }
        }

        let (bw, bh) = bloom_size(self.width, self.height);
        self.post.write_uniforms(
            &self.queue,
            [bw as f32, bh as f32],
            scene.clock.time,
            scene.clock.scroll_norm,
        );

        // Bright pass -> bloom_a, blur H -> bloom_b, blur V -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Copy `data` into `buffer`, never past `capacity` elements. Returns the
/// element count written.
fn upload<T: bytemuck::Pod>(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    data: &[T],
    capacity: usize,
) -> u32 {
    let n = data.len().min(capacity);
    if n > 0 {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(&data[..n]));
    }
    n as u32
}
