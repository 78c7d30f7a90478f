//! Bind group layouts shared by the scene pipelines.
//!
//! Group 0 is the camera, group 1 the per-mesh transform, group 2 the globe
//! texture.

use orbis_render::{GpuTexture, camera_bind_group_layout, mesh_bind_group_layout};

pub struct SceneLayouts {
    pub camera: wgpu::BindGroupLayout,
    pub mesh: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

impl SceneLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            camera: camera_bind_group_layout(device),
            mesh: mesh_bind_group_layout(device),
            texture: GpuTexture::bind_group_layout(device),
        }
    }
}

/// Pipeline layout over the given bind group layouts.
pub(crate) fn pipeline_layout(
    device: &wgpu::Device,
    label: &str,
    groups: &[&wgpu::BindGroupLayout],
) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: groups,
        immediate_size: 0,
    })
}
