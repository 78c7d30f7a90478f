//! Render pipeline for the glow shell: front faces culled so only the inside
//! of the shell draws, blended additively (`src * src_alpha + dst`).

use orbis_render::{
    DepthBuffer, FRAGMENT_ENTRY, ShaderError, ShaderLibrary, VERTEX_ENTRY, VertexPositionNormalUv,
    single_sample,
};

use crate::layouts::{SceneLayouts, pipeline_layout};

pub const ATMOSPHERE_SHADER_SOURCE: &str = include_str!("shaders/atmosphere.wgsl");

pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

pub struct AtmospherePipeline {
    pub pipeline: wgpu::RenderPipeline,
}

impl AtmospherePipeline {
    pub fn new(
        device: &wgpu::Device,
        shaders: &mut ShaderLibrary,
        layouts: &SceneLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let shader = shaders.load_program(device, "atmosphere", ATMOSPHERE_SHADER_SOURCE)?;
        let layout = pipeline_layout(
            device,
            "atmosphere-pipeline-layout",
            &[&layouts.camera, &layouts.mesh],
        );

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("atmosphere-pipeline"),
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
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(true)),
            multisample: single_sample(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(ADDITIVE_BLEND),
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
