use super::helpers;
use crate::geometry::MeshVertex;
use wgpu;

/// Vertex buffer plus the pipeline that draws it; lines and rings differ only
/// in topology.
pub(crate) struct MeshResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertices: wgpu::Buffer,
    pub(crate) capacity: usize,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    globals_layout: &wgpu::BindGroupLayout,
    target_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
    capacity: usize,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(super::MESH_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });
    let attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
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
    let vertices = helpers::create_buffer(
        device,
        label,
        capacity * std::mem::size_of::<MeshVertex>(),
        wgpu::BufferUsages::VERTEX,
    );
    MeshResources {
        pipeline,
        vertices,
        capacity,
    }
}
