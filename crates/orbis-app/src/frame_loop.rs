//! Per-frame scene update.
//!
//! [`GlobeState`] owns everything the frame loop mutates: the scene, the
//! viewport, the pointer, and the group rotation tween. Window events reach
//! it through `&mut self`, and [`RenderLoop::tick`] advances it once per
//! redraw.

use glam::Vec2;
use orbis_animation::{Ease, Tweener};
use orbis_config::{Config, EaseKind, MotionConfig, PointerYMapping};
use orbis_input::{PointerTracker, VerticalMapping};
use orbis_render::{Viewport, ViewportResize};
use orbis_scene::GlobeScene;
use tracing::debug;

/// Frame rate the per-frame spin is calibrated against.
const REFERENCE_FPS: f64 = 60.0;

/// Something advanced once per displayed frame.
pub trait RenderLoop {
    /// Advance by `dt` seconds of wall-clock time.
    fn tick(&mut self, dt: f64);
}

pub struct GlobeState {
    pub scene: GlobeScene,
    viewport: Viewport,
    pointer: PointerTracker,
    rotation: Tweener,
    motion: MotionConfig,
    frames: u64,
}

impl GlobeState {
    pub fn new(scene: GlobeScene, viewport: Viewport, config: &Config) -> Self {
        let mut state = Self {
            scene,
            viewport,
            pointer: PointerTracker::new(vertical_mapping(config.input.pointer_y_mapping)),
            rotation: Tweener::new(config.motion.ease_duration, ease(config.motion.ease)),
            motion: config.motion.clone(),
            frames: 0,
        };
        let initial = state.viewport.snapshot();
        state.apply_viewport(&initial);
        state
    }

    /// Build the scene from `config` and wrap it.
    pub fn from_config(config: &Config, viewport: Viewport) -> Self {
        Self::new(GlobeScene::new(&config.scene), viewport, config)
    }

    /// Pointer moved to `(x, y)` in logical pixels.
    pub fn on_pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.on_pointer_moved(
            x,
            y,
            self.viewport.logical_width(),
            self.viewport.logical_height(),
        );
    }

    /// Window resized to a physical size. `None` when nothing changed.
    pub fn on_resize(&mut self, physical_width: u32, physical_height: u32) -> Option<ViewportResize> {
        let resize = self.viewport.handle_resize(physical_width, physical_height)?;
        self.apply_viewport(&resize);
        Some(resize)
    }

    pub fn on_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportResize> {
        let resize = self.viewport.handle_scale_factor_changed(
            scale_factor,
            physical_width,
            physical_height,
        )?;
        self.apply_viewport(&resize);
        Some(resize)
    }

    fn apply_viewport(&mut self, resize: &ViewportResize) {
        self.scene.camera.set_aspect_ratio(
            resize.logical_width as f32,
            resize.logical_height as f32,
        );
    }

    /// Swap in new motion, input, and pixel ratio settings, e.g. after a
    /// config reload. Returns the new surface if the pixel ratio cap resized it.
    pub fn apply_config(&mut self, config: &Config) -> Option<ViewportResize> {
        self.motion = config.motion.clone();
        self.rotation.set_duration(config.motion.ease_duration);
        self.rotation.set_ease(ease(config.motion.ease));
        let mapping = vertical_mapping(config.input.pointer_y_mapping);
        if self.pointer.mapping() != mapping {
            debug!("Pointer vertical mapping now {:?}", mapping);
            self.pointer.set_mapping(mapping);
        }

        let resize = self
            .viewport
            .set_max_pixel_ratio(config.render.max_pixel_ratio)?;
        self.apply_viewport(&resize);
        Some(resize)
    }

    /// Group rotation the pointer asks for: pitch from Y, yaw from X.
    pub fn rotation_target(&self) -> Option<Vec2> {
        self.pointer.normalized().map(|p| {
            Vec2::new(
                -p.y * self.motion.pitch_factor,
                p.x * self.motion.yaw_factor,
            )
        })
    }

    fn spin_step(&self, dt: f64) -> f32 {
        if self.motion.time_scaled_spin {
            (self.motion.spin_per_frame as f64 * dt * REFERENCE_FPS) as f32
        } else {
            self.motion.spin_per_frame
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderLoop for GlobeState {
    fn tick(&mut self, dt: f64) {
        self.scene.spin(self.spin_step(dt));

        if let Some(target) = self.rotation_target() {
            self.rotation.start(self.scene.group_rotation(), target);
        }
        if let Some(rotation) = self.rotation.advance(dt as f32) {
            self.scene.set_group_rotation(rotation);
        }

        self.frames += 1;
        if self.frames == 1 {
            debug!("First frame ticked (dt {:.4}s)", dt);
        }
    }
}

pub fn ease(kind: EaseKind) -> Ease {
    match kind {
        EaseKind::Linear => Ease::Linear,
        EaseKind::QuadOut => Ease::QuadOut,
        EaseKind::CubicOut => Ease::CubicOut,
        EaseKind::QuadInOut => Ease::QuadInOut,
    }
}

pub fn vertical_mapping(mapping: PointerYMapping) -> VerticalMapping {
    match mapping {
        PointerYMapping::Legacy => VerticalMapping::Legacy,
        PointerYMapping::Mirrored => VerticalMapping::Mirrored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::TAU;

    const DT: f64 = 1.0 / 60.0;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.scene.star_seed = Some(1);
        config
    }

    fn test_state() -> GlobeState {
        GlobeState::from_config(&test_config(), Viewport::new(800.0, 600.0, 1.0, 2.0))
    }

    #[test]
    fn test_spin_is_per_frame() {
        let mut state = test_state();
        for n in 1..=500u32 {
            // Uneven frame times must not change the spin.
            state.tick(if n % 2 == 0 { DT } else { 3.0 * DT });
        }
        let expected = (0.003f32 * 500.0).rem_euclid(TAU);
        assert!((state.scene.globe_spin().rem_euclid(TAU) - expected).abs() < 1e-3);
        assert_eq!(state.frames(), 500);
    }

    #[test]
    fn test_spin_ignores_pointer() {
        let mut plain = test_state();
        let mut moved = test_state();
        moved.on_pointer_moved(700.0, 20.0);
        for _ in 0..120 {
            plain.tick(DT);
            moved.tick(DT);
        }
        assert_eq!(plain.scene.globe_spin(), moved.scene.globe_spin());
    }

    #[test]
    fn test_time_scaled_spin() {
        let mut config = test_config();
        config.motion.time_scaled_spin = true;
        let mut state = GlobeState::from_config(&config, Viewport::new(800.0, 600.0, 1.0, 2.0));
        state.tick(2.0 * DT);
        assert!((state.scene.globe_spin() - 0.006).abs() < 1e-6);
    }

    #[test]
    fn test_group_rests_without_pointer() {
        let mut state = test_state();
        for _ in 0..60 {
            state.tick(DT);
        }
        assert!(state.rotation_target().is_none());
        assert_eq!(state.scene.group_rotation(), Vec2::ZERO);
    }

    #[test]
    fn test_rotation_target_from_pointer() {
        let mut state = test_state();
        // px = 600 / 800 * 2 - 1 = 0.5, py = 150 / 600 * 2 + 1 = 1.5
        state.on_pointer_moved(600.0, 150.0);
        let target = state.rotation_target().unwrap();
        assert!((target.x - (-1.5 * 0.3)).abs() < 1e-6);
        assert!((target.y - 0.5 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_eases_toward_target() {
        let mut state = test_state();
        state.on_pointer_moved(600.0, 150.0);
        let target = state.rotation_target().unwrap();

        state.tick(DT);
        let first = state.scene.group_rotation();
        assert!(first.x < 0.0 && first.x > target.x);
        assert!(first.y > 0.0 && first.y < target.y);

        let mut previous = first.distance(target);
        for _ in 0..600 {
            state.tick(DT);
            let distance = state.scene.group_rotation().distance(target);
            assert!(distance <= previous + 1e-6);
            previous = distance;
        }
        assert!(previous < 1e-3);
    }

    #[test]
    fn test_mirrored_mapping_from_config() {
        let mut config = test_config();
        config.input.pointer_y_mapping = PointerYMapping::Mirrored;
        let mut state = GlobeState::from_config(&config, Viewport::new(800.0, 600.0, 1.0, 2.0));
        state.on_pointer_moved(400.0, 0.0);
        let target = state.rotation_target().unwrap();
        assert!((target.x - (-0.3)).abs() < 1e-6);
        assert!(target.y.abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect_and_surface() {
        let mut state = GlobeState::from_config(
            &test_config(),
            Viewport::new(800.0, 600.0, 3.0, 2.0),
        );
        // 1600x900 logical at a device ratio of 3.
        let resize = state.on_resize(4800, 2700).unwrap();
        assert_eq!(state.scene.camera.aspect_ratio, 1600.0f32 / 900.0f32);
        assert_eq!(resize.pixel_ratio, 2.0);
        assert_eq!(resize.surface.width, 3200);
        assert_eq!(resize.surface.height, 1800);
    }

    #[test]
    fn test_resize_idempotent() {
        let mut state = test_state();
        assert!(state.on_resize(1024, 768).is_some());
        let camera = state.scene.camera.clone();
        let viewport = state.viewport().clone();
        assert!(state.on_resize(1024, 768).is_none());
        assert_eq!(state.scene.camera, camera);
        assert_eq!(state.viewport(), &viewport);
    }

    #[test]
    fn test_scale_factor_change_goes_through_resize() {
        let mut state = test_state();
        let resize = state.on_scale_factor_changed(2.0, 1600, 1200).unwrap();
        assert_eq!(resize.logical_width, 800.0);
        assert_eq!(resize.surface.width, 1600);
        // Same logical size, so the aspect is unchanged.
        assert_eq!(state.scene.camera.aspect_ratio, 800.0f32 / 600.0f32);
    }

    #[test]
    fn test_pointer_uses_logical_viewport() {
        let mut state = test_state();
        state.on_scale_factor_changed(2.0, 1600, 1200);
        state.on_pointer_moved(800.0, 0.0);
        let target = state.rotation_target().unwrap();
        assert!((target.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_atmosphere_ratio_every_frame() {
        let mut state = test_state();
        state.on_pointer_moved(10.0, 590.0);
        for _ in 0..90 {
            state.tick(DT);
            assert_eq!(
                state.scene.atmosphere_scale(),
                state.scene.globe_scale() * 1.1
            );
        }
        assert_eq!(state.scene.atmosphere_scale(), Vec3::splat(1.1));
    }

    #[test]
    fn test_apply_config_switches_motion() {
        let mut state = test_state();
        let mut config = test_config();
        config.motion.spin_per_frame = 0.01;
        config.motion.yaw_factor = 1.0;
        state.apply_config(&config);
        state.on_pointer_moved(800.0, 0.0);
        assert!((state.rotation_target().unwrap().y - 1.0).abs() < 1e-6);
        state.tick(DT);
        assert!((state.scene.globe_spin() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_apply_config_caps_pixel_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 2.0, 2.0);
        let mut state = GlobeState::from_config(&test_config(), viewport);
        assert!(state.apply_config(&test_config()).is_none());

        let mut config = test_config();
        config.render.max_pixel_ratio = 1.0;
        let resize = state.apply_config(&config).unwrap();
        assert_eq!((resize.surface.width, resize.surface.height), (800, 600));
        assert_eq!(state.viewport().pixel_ratio(), 1.0);
    }

    #[test]
    fn test_config_enum_mapping() {
        assert_eq!(ease(EaseKind::default()), Ease::QuadOut);
        assert_eq!(ease(EaseKind::CubicOut), Ease::CubicOut);
        assert_eq!(
            vertical_mapping(PointerYMapping::default()),
            VerticalMapping::Legacy
        );
    }
}
