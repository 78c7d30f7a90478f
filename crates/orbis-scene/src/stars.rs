//! Render pipeline for the star point cloud.

use orbis_render::{
    DepthBuffer, FRAGMENT_ENTRY, ShaderError, ShaderLibrary, VERTEX_ENTRY, VertexPosition,
    single_sample,
};

use crate::layouts::{SceneLayouts, pipeline_layout};

pub const STARS_SHADER_SOURCE: &str = include_str!("shaders/stars.wgsl");

pub struct StarPipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl StarPipeline {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        layouts: &SceneLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let shader = shaders.load_program(device, "stars", STARS_SHADER_SOURCE)?;
        let layout = pipeline_layout(
            device,
            "stars-pipeline-layout",
            &[&layouts.camera, &layouts.mesh],
        );

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stars-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[VertexPosition::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: single_sample(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self { pipeline })
    }
}
