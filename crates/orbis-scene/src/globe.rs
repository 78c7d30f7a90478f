//! Render pipeline for the textured globe.

use std::sync::Arc;

use orbis_render::{
    DepthBuffer, FRAGMENT_ENTRY, ShaderError, ShaderLibrary, VERTEX_ENTRY, VertexPositionNormalUv,
    single_sample,
};

use crate::layouts::{SceneLayouts, pipeline_layout};

pub const GLOBE_SHADER_SOURCE: &str = include_str!("shaders/globe.wgsl");

/// Opaque, back-face culled, depth-writing pipeline.
pub struct GlobePipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl GlobePipeline {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        layouts: &SceneLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let shader: Arc<wgpu::ShaderModule> =
            shaders.load_program(device, "globe", GLOBE_SHADER_SOURCE)?;
        let layout = pipeline_layout(
            device,
            "globe-pipeline-layout",
            &[&layouts.camera, &layouts.mesh, &layouts.texture],
        );

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("globe-pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[VertexPositionNormalUv::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
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
