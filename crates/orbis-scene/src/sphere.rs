//! UV sphere generation.
//!
//! Rings of latitude from the north pole (+Y) to the south pole, each ring
//! holding `width_segments + 1` vertices so the texture seam gets its own
//! column. Pole rows produce one triangle per segment instead of two.

use glam::Vec3;
use orbis_render::VertexPositionNormalUv;

/// Parameters for a UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

/// CPU-side sphere mesh ready for upload.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<VertexPositionNormalUv>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Build vertices (position, outward unit normal, UV) and CCW triangles.
    ///
    /// UVs are in texture space: u follows longitude, v = 0 is the top row of
    /// an equirectangular image (north pole).
    pub fn build(&self) -> SphereMesh {
        let ws = self.width_segments;
        let hs = self.height_segments;
        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            // Pole vertices sit in the middle of their segment.
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };

            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let phi = u * std::f32::consts::TAU;
                let theta = v * std::f32::consts::PI;

                let direction = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                let position = direction * self.radius;

                vertices.push(VertexPositionNormalUv {
                    position: position.to_array(),
                    normal: direction.normalize_or_zero().to_array(),
                    uv: [u + u_offset, v],
                });
            }
        }

        let row = ws + 1;
        let mut indices = Vec::with_capacity((ws * (hs - 1) * 6) as usize);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        SphereMesh { vertices, indices }
    }
}
