//! GPU uniform layouts and helpers shared by the scene pipelines.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};
use std::marker::PhantomData;
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

/// Per-frame camera data. Matches `CameraUniform` in the scene shaders.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

/// Per-mesh transform data. `normal_matrix` transforms object-space normals
/// into view space (inverse-transpose of model-view, padded to a mat4).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl MeshUniform {
    /// Build from a world matrix and the camera's view matrix.
    pub fn new(model: Mat4, view: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix(view * model).to_cols_array_2d(),
        }
    }
}

/// Inverse-transpose of the upper 3×3 of `model_view`, as a mat4.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(model_view).inverse().transpose())
}

/// A uniform buffer holding a single `T`.
pub struct UniformBuffer<T: Pod> {
    pub buffer: wgpu::Buffer,
    _marker: PhantomData<T>,
}

impl<T: Pod> UniformBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str, value: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        Self {
            buffer,
            _marker: PhantomData,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    pub fn binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// Layout entry for a uniform buffer of type `T`.
pub fn uniform_layout_entry<T: Pod>(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

/// Layout for group 0: the camera uniform, visible to both stages.
pub fn camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("camera-bind-group-layout"),
        entries: &[uniform_layout_entry::<CameraUniform>(
            0,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    })
}

/// Layout for a per-mesh group: the mesh uniform at binding 0.
pub fn mesh_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("mesh-bind-group-layout"),
        entries: &[uniform_layout_entry::<MeshUniform>(
            0,
            wgpu::ShaderStages::VERTEX,
        )],
    })
}

/// Bind group containing a single uniform buffer at binding 0.
pub fn uniform_bind_group<T: Pod>(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    uniform: &UniformBuffer<T>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform.binding(),
        }],
    })
}

/// Multisample state without MSAA.
pub fn single_sample() -> wgpu::MultisampleState {
    wgpu::MultisampleState {
        count: 1,
        mask: !0,
        alpha_to_coverage_enabled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::create_test_device_queue;
    use glam::{EulerRot, Quat, Vec3};

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        assert_eq!(std::mem::size_of::<MeshUniform>(), 128);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let rotation = Mat4::from_quat(Quat::from_euler(EulerRot::XYZ, 0.3, 1.2, 0.0));
        let n = normal_matrix(rotation);
        let v = Vec3::new(0.0, 1.0, 0.0);
        let expected = rotation.transform_vector3(v);
        assert!((n.transform_vector3(v) - expected).length() < 1e-5);
    }

    #[test]
    fn test_normal_matrix_ignores_translation_and_uniform_scale_direction() {
        let model_view =
            Mat4::from_translation(Vec3::new(0.0, 0.0, -15.0)) * Mat4::from_scale(Vec3::splat(1.1));
        let n = normal_matrix(model_view);
        let normal = n.transform_vector3(Vec3::Z).normalize();
        assert!((normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_mesh_uniform_from_identity() {
        let uniform = MeshUniform::new(Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(uniform.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(uniform.normal_matrix, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_uniform_buffer_size_matches_type() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let uniform = UniformBuffer::new(&device, "test-mesh", &MeshUniform::zeroed());
        assert_eq!(uniform.buffer.size(), 128);
        uniform.write(&queue, &MeshUniform::new(Mat4::IDENTITY, Mat4::IDENTITY));

        let layout = mesh_bind_group_layout(&device);
        let _bind_group = uniform_bind_group(&device, "test-mesh", &layout, &uniform);
    }
}
