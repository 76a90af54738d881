use super::helpers;
use crate::geometry::PointInstance;
use wgpu;

pub(crate) struct PointResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) instances: wgpu::Buffer,
    pub(crate) capacity: usize,
}

pub(crate) fn create_point_resources(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    target_format: wgpu::TextureFormat,
    capacity: usize,
) -> PointResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(super::POINTS_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    let attributes = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4, 2 => Float32x4];
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &attributes,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: Some(helpers::additive_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let instances = helpers::create_buffer(
        device,
        "point_instances",
        capacity * std::mem::size_of::<PointInstance>(),
        wgpu::BufferUsages::VERTEX,
    );
    PointResources {
        pipeline,
        instances,
        capacity,
    }
}
