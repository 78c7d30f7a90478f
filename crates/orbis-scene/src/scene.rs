//! CPU-side scene: graph, shared sphere geometry, stars, light, and camera.
//!
//! Built once at startup with no GPU dependency. The renderer uploads the
//! geometry afterwards and reads world matrices from here every frame.

use glam::{Mat4, Vec2, Vec3};
use orbis_config::SceneConfig;
use orbis_render::Camera;

use crate::graph::{NodeId, NodeKind, SceneGraph};
use crate::light::PointLight;
use crate::sphere::{SphereGeometry, SphereMesh};
use crate::starfield::{StarField, StarFieldGenerator};
use crate::transform::Transform;

/// Scale of the atmosphere shell relative to the globe. Fixed, not
/// configurable.
pub const ATMOSPHERE_SCALE: f32 = 1.1;

pub struct GlobeScene {
    pub graph: SceneGraph,
    pub camera: Camera,
    pub light: PointLight,
    /// Geometry shared by the globe and the atmosphere shell.
    pub sphere: SphereMesh,
    pub stars: StarField,
    group: NodeId,
    globe: NodeId,
    atmosphere: NodeId,
    star_node: NodeId,
}

impl GlobeScene {
    pub fn new(config: &SceneConfig) -> Self {
        let sphere = SphereGeometry::new(
            config.globe_radius,
            config.width_segments,
            config.height_segments,
        )
        .build();

        let stars = StarFieldGenerator::new(
            config.star_count,
            config.star_half_extent,
            config.star_depth,
        )
        .with_seed(config.star_seed)
        .generate();

        let light_position = Vec3::from_array(config.light_position);
        let light = PointLight::white(config.light_intensity, light_position);

        let mut graph = SceneGraph::new();
        let group = graph.add("group", NodeKind::Group, Transform::IDENTITY, None);
        let globe = graph.add("globe", NodeKind::Globe, Transform::IDENTITY, Some(group));
        let atmosphere = graph.add(
            "atmosphere",
            NodeKind::Atmosphere,
            Transform::from_scale(ATMOSPHERE_SCALE),
            None,
        );
        let star_node = graph.add("stars", NodeKind::Stars, Transform::IDENTITY, None);
        graph.add(
            "light",
            NodeKind::Light,
            Transform::from_position(light_position),
            None,
        );

        // Aspect is fixed up by the first resize.
        let camera = Camera::perspective(config.fov_y_degrees, 1.0, config.near, config.far)
            .at(Vec3::new(0.0, 0.0, config.camera_distance));

        log::info!(
            "Scene built: {} nodes, {} sphere vertices, {} stars",
            graph.len(),
            sphere.vertices.len(),
            stars.len()
        );

        Self {
            graph,
            camera,
            light,
            sphere,
            stars,
            group,
            globe,
            atmosphere,
            star_node,
        }
    }

    /// Add `delta` radians to the globe's spin about its Y axis.
    pub fn spin(&mut self, delta: f32) {
        self.graph.transform_mut(self.globe).rotation.y += delta;
    }

    pub fn globe_spin(&self) -> f32 {
        self.graph.transform(self.globe).rotation.y
    }

    /// Group rotation as (x, y) Euler angles.
    pub fn group_rotation(&self) -> Vec2 {
        let rotation = self.graph.transform(self.group).rotation;
        Vec2::new(rotation.x, rotation.y)
    }

    pub fn set_group_rotation(&mut self, rotation: Vec2) {
        let transform = self.graph.transform_mut(self.group);
        transform.rotation.x = rotation.x;
        transform.rotation.y = rotation.y;
    }

    pub fn globe_scale(&self) -> Vec3 {
        self.graph.transform(self.globe).scale
    }

    pub fn atmosphere_scale(&self) -> Vec3 {
        self.graph.transform(self.atmosphere).scale
    }

    pub fn globe_world_matrix(&self) -> Mat4 {
        self.graph.world_matrix(self.globe)
    }

    pub fn atmosphere_world_matrix(&self) -> Mat4 {
        self.graph.world_matrix(self.atmosphere)
    }

    pub fn stars_world_matrix(&self) -> Mat4 {
        self.graph.world_matrix(self.star_node)
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn globe(&self) -> NodeId {
        self.globe
    }

    pub fn atmosphere(&self) -> NodeId {
        self.atmosphere
    }
}
