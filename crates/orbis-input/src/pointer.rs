//! Pointer tracker.
//!
//! [`PointerTracker`] converts client-space cursor coordinates (logical
//! pixels, origin top-left) into normalized values. The state starts unset
//! and every move overwrites it; the frame loop reads it once per tick.

use glam::Vec2;

/// How the vertical client coordinate maps to a normalized value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalMapping {
    /// `y / height * 2 + 1`. Ranges over `[1, 3]`.
    #[default]
    Legacy,
    /// `-(y / height * 2 - 1)`. Top edge is `1`, bottom edge is `-1`.
    Mirrored,
}

impl VerticalMapping {
    fn normalize(self, y: f64, height: f64) -> f64 {
        match self {
            VerticalMapping::Legacy => y / height * 2.0 + 1.0,
            VerticalMapping::Mirrored => -(y / height * 2.0 - 1.0),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    mapping: VerticalMapping,
    normalized: Option<Vec2>,
}

impl PointerTracker {
    #[must_use]
    pub fn new(mapping: VerticalMapping) -> Self {
        Self {
            mapping,
            normalized: None,
        }
    }

    /// Process a pointer move at `(x, y)` within a `width` x `height`
    /// viewport. A zero-sized viewport is ignored.
    pub fn on_pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            tracing::trace!("Pointer move ignored: empty viewport {width}x{height}");
            return;
        }
        let nx = x / width * 2.0 - 1.0;
        let ny = self.mapping.normalize(y, height);
        self.normalized = Some(Vec2::new(nx as f32, ny as f32));
    }

    /// Latest normalized position, `None` until the first move.
    pub fn normalized(&self) -> Option<Vec2> {
        self.normalized
    }

    pub fn mapping(&self) -> VerticalMapping {
        self.mapping
    }

    pub fn set_mapping(&mut self, mapping: VerticalMapping) {
        self.mapping = mapping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_initially() {
        let tracker = PointerTracker::default();
        assert!(tracker.normalized().is_none());
        assert_eq!(tracker.mapping(), VerticalMapping::Legacy);
    }

    #[test]
    fn test_legacy_mapping() {
        let mut tracker = PointerTracker::new(VerticalMapping::Legacy);
        tracker.on_pointer_moved(0.0, 0.0, 800.0, 600.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(-1.0, 1.0)));

        tracker.on_pointer_moved(400.0, 300.0, 800.0, 600.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(0.0, 2.0)));

        tracker.on_pointer_moved(800.0, 600.0, 800.0, 600.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(1.0, 3.0)));
    }

    #[test]
    fn test_mirrored_mapping() {
        let mut tracker = PointerTracker::new(VerticalMapping::Mirrored);
        tracker.on_pointer_moved(200.0, 0.0, 800.0, 600.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(-0.5, 1.0)));

        tracker.on_pointer_moved(200.0, 600.0, 800.0, 600.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(-0.5, -1.0)));
    }

    #[test]
    fn test_last_write_wins() {
        let mut tracker = PointerTracker::default();
        tracker.on_pointer_moved(100.0, 100.0, 200.0, 200.0);
        tracker.on_pointer_moved(200.0, 0.0, 200.0, 200.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_zero_viewport_keeps_state() {
        let mut tracker = PointerTracker::default();
        tracker.on_pointer_moved(0.0, 0.0, 0.0, 0.0);
        assert!(tracker.normalized().is_none());

        tracker.on_pointer_moved(50.0, 50.0, 100.0, 100.0);
        tracker.on_pointer_moved(10.0, 10.0, 100.0, 0.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(0.0, 2.0)));
    }

    #[test]
    fn test_switch_mapping() {
        let mut tracker = PointerTracker::default();
        tracker.on_pointer_moved(50.0, 50.0, 100.0, 100.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(0.0, 2.0)));

        tracker.set_mapping(VerticalMapping::Mirrored);
        tracker.on_pointer_moved(50.0, 50.0, 100.0, 100.0);
        assert_eq!(tracker.normalized(), Some(Vec2::new(0.0, 0.0)));
    }
}
