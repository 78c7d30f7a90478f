//! Backdrop star point cloud: uniform random placement in a box in front of
//! and behind the origin along -Z.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use orbis_render::VertexPosition;

/// Generated star positions.
#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    pub positions: Vec<Vec3>,
}

impl StarField {
    pub fn vertices(&self) -> Vec<VertexPosition> {
        self.positions
            .iter()
            .map(|p| VertexPosition {
                position: p.to_array(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Samples `x, y` in `[-half_extent, half_extent]` and `z` in `[-depth, 0]`.
#[derive(Debug, Clone)]
pub struct StarFieldGenerator {
    seed: Option<u64>,
    count: u32,
    half_extent: f32,
    depth: f32,
}

impl StarFieldGenerator {
    pub fn new(count: u32, half_extent: f32, depth: f32) -> Self {
        Self {
            seed: None,
            count,
            half_extent,
            depth,
        }
    }

    /// Fix the seed so the same field is produced every run.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn generate(&self) -> StarField {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("Generating {} stars (seed {seed})", self.count);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let span = self.half_extent * 2.0;
        let positions = (0..self.count)
            .map(|_| {
                let x = (rng.random::<f32>() - 0.5) * span;
                let y = (rng.random::<f32>() - 0.5) * span;
                let z = -rng.random::<f32>() * self.depth;
                Vec3::new(x, y, z)
            })
            .collect();

        StarField { positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> StarFieldGenerator {
        StarFieldGenerator::new(800, 100.0, 1200.0)
    }

    #[test]
    fn test_star_count() {
        let field = generator().with_seed(Some(1)).generate();
        assert_eq!(field.len(), 800);
        assert_eq!(field.vertices().len(), 800);
    }

    #[test]
    fn test_stars_within_volume() {
        for seed in 0..5 {
            let field = generator().with_seed(Some(seed)).generate();
            for p in &field.positions {
                assert!((-100.0..=100.0).contains(&p.x), "x = {}", p.x);
                assert!((-100.0..=100.0).contains(&p.y), "y = {}", p.y);
                assert!((-1200.0..=0.0).contains(&p.z), "z = {}", p.z);
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = generator().with_seed(Some(42)).generate();
        let b = generator().with_seed(Some(42)).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generator().with_seed(Some(1)).generate();
        let b = generator().with_seed(Some(2)).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unseeded_fields_vary() {
        let a = generator().generate();
        let b = generator().generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stars_spread_over_volume() {
        let field = generator().with_seed(Some(7)).generate();
        let mean_z = field.positions.iter().map(|p| p.z).sum::<f32>() / field.len() as f32;
        assert!((mean_z + 600.0).abs() < 60.0, "mean z = {mean_z}");
        assert!(field.positions.iter().any(|p| p.x < -50.0));
        assert!(field.positions.iter().any(|p| p.x > 50.0));
    }
}
