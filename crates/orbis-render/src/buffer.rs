//! Vertex formats and GPU mesh buffers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Indexed mesh living on the GPU.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Upload vertices and `u32` indices.
    pub fn new<V: Pod>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: &[u32],
    ) -> Self {
        let vertex_buffer = create_vertex_buffer(device, &format!("{label}-vertices"), vertices);
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            index_format: wgpu::IndexFormat::Uint32,
        }
    }

    /// Bind vertex and index buffers to a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Non-indexed vertex list (point clouds).
pub struct PointBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl PointBuffer {
    pub fn new<V: Pod>(device: &wgpu::Device, label: &str, vertices: &[V]) -> Self {
        Self {
            vertex_buffer: create_vertex_buffer(device, label, vertices),
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

fn create_vertex_buffer<V: Pod>(device: &wgpu::Device, label: &str, data: &[V]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Position-only vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct VertexPosition {
    pub position: [f32; 3],
}

impl VertexPosition {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPosition>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex with position, normal, and UV coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, PartialEq)]
pub struct VertexPositionNormalUv {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexPositionNormalUv {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexPositionNormalUv>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::create_test_device_queue;

    #[test]
    fn test_vertex_position_layout() {
        let layout = VertexPosition::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
    }

    #[test]
    fn test_vertex_position_normal_uv_layout() {
        let layout = VertexPositionNormalUv::layout();
        // position (f32×3) + normal (f32×3) + uv (f32×2) = 32 bytes stride
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 24);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_mesh_buffer_index_count() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let vertices = [VertexPosition {
            position: [0.0; 3],
        }; 4];
        let mesh = MeshBuffer::new(&device, "quad", &vertices, &[0, 1, 2, 2, 3, 0]);
        assert_eq!(mesh.index_count, 6);
        assert_eq!(mesh.index_format, wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_point_buffer_vertex_count() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let points = vec![
            VertexPosition {
                position: [1.0, 2.0, 3.0],
            };
            800
        ];
        let buffer = PointBuffer::new(&device, "stars", &points);
        assert_eq!(buffer.vertex_count, 800);
        assert_eq!(buffer.vertex_buffer.size(), 800 * 12);
    }
}
