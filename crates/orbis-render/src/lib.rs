//! wgpu rendering core: device and surface setup, viewport sizing, camera,
//! depth buffer, passes, shaders, textures, and GPU buffers.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod surface;
pub mod texture;

pub use buffer::{MeshBuffer, PointBuffer, VertexPosition, VertexPositionNormalUv};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use pipeline::{
    CameraUniform, MeshUniform, UniformBuffer, camera_bind_group_layout, mesh_bind_group_layout,
    normal_matrix, single_sample, uniform_bind_group, uniform_layout_entry,
};
pub use shader::{FRAGMENT_ENTRY, ShaderError, ShaderLibrary, VERTEX_ENTRY, parse_program};
pub use surface::{DEFAULT_MAX_PIXEL_RATIO, PhysicalSize, Viewport, ViewportResize};
pub use texture::{GpuTexture, TEXTURE_FORMAT, TextureError, TextureImage};
