//! Scene light. Neither the globe nor the atmosphere shader reads it.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn white(intensity: f32, position: Vec3) -> Self {
        Self {
            color: Vec3::ONE,
            intensity,
            position,
        }
    }
}
