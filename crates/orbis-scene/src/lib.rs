//! The globe scene: sphere geometry, scene graph, star field, light, and the
//! globe, atmosphere, and star render pipelines.

pub mod atmosphere;
pub mod globe;
pub mod graph;
pub mod layouts;
pub mod light;
pub mod scene;
pub mod sphere;
pub mod starfield;
pub mod stars;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use atmosphere::{ADDITIVE_BLEND, ATMOSPHERE_SHADER_SOURCE, AtmospherePipeline};
pub use globe::{GLOBE_SHADER_SOURCE, GlobePipeline};
pub use graph::{Node, NodeId, NodeKind, SceneGraph};
pub use layouts::SceneLayouts;
pub use light::PointLight;
pub use scene::{ATMOSPHERE_SCALE, GlobeScene};
pub use sphere::{SphereGeometry, SphereMesh};
pub use starfield::{StarField, StarFieldGenerator};
pub use stars::{STARS_SHADER_SOURCE, StarPipeline};
pub use transform::Transform;
