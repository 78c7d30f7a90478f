//! Viewport sizing: logical window size, device pixel ratio, and the physical
//! size of the render surface derived from them.
//!
//! winit reports physical sizes plus a scale factor. The render surface is
//! sized from the logical size times the pixel ratio clamped to a configured
//! maximum, so high-density displays do not render more pixels than needed.

/// Minimum surface dimension (prevents zero-size panics).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Default upper bound for the pixel ratio.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

/// Produced when the viewport's logical size or pixel ratio changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportResize {
    /// New render surface size.
    pub surface: PhysicalSize,
    /// New logical width.
    pub logical_width: f64,
    /// New logical height.
    pub logical_height: f64,
    /// Pixel ratio applied to the surface (already clamped).
    pub pixel_ratio: f64,
    /// Logical width over logical height.
    pub aspect_ratio: f32,
}

/// Tracks the window's logical size and the display's pixel ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    logical_width: f64,
    logical_height: f64,
    device_pixel_ratio: f64,
    max_pixel_ratio: f64,
}

impl Viewport {
    /// Build from a logical size and the display's device pixel ratio.
    pub fn new(
        logical_width: f64,
        logical_height: f64,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        Self {
            logical_width: logical_width.max(0.0),
            logical_height: logical_height.max(0.0),
            device_pixel_ratio: sanitize_ratio(device_pixel_ratio),
            max_pixel_ratio: sanitize_ratio(max_pixel_ratio),
        }
    }

    /// Build from a winit physical size and scale factor.
    pub fn from_physical(
        physical_width: u32,
        physical_height: u32,
        scale_factor: f64,
        max_pixel_ratio: f64,
    ) -> Self {
        let scale_factor = sanitize_ratio(scale_factor);
        Self::new(
            physical_width as f64 / scale_factor,
            physical_height as f64 / scale_factor,
            scale_factor,
            max_pixel_ratio,
        )
    }

    /// Handle a window resize reported in physical pixels.
    ///
    /// Returns `None` when nothing changed, so repeating the same size is a
    /// no-op.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportResize> {
        let logical_width = physical_width as f64 / self.device_pixel_ratio;
        let logical_height = physical_height as f64 / self.device_pixel_ratio;
        self.apply(logical_width, logical_height, self.device_pixel_ratio)
    }

    /// Handle a scale factor change (window moved to another display, or the
    /// user changed display scaling). Goes through the same path as a resize.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<ViewportResize> {
        let scale_factor = sanitize_ratio(scale_factor);
        let logical_width = physical_width as f64 / scale_factor;
        let logical_height = physical_height as f64 / scale_factor;
        self.apply(logical_width, logical_height, scale_factor)
    }

    fn apply(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        device_pixel_ratio: f64,
    ) -> Option<ViewportResize> {
        let before = self.surface_size();
        let unchanged = logical_width == self.logical_width
            && logical_height == self.logical_height
            && device_pixel_ratio == self.device_pixel_ratio;
        if unchanged {
            return None;
        }

        self.logical_width = logical_width;
        self.logical_height = logical_height;
        self.device_pixel_ratio = device_pixel_ratio;

        log::debug!(
            "Viewport {}x{} @ {} -> surface {:?} (was {:?})",
            logical_width,
            logical_height,
            self.pixel_ratio(),
            self.surface_size(),
            before
        );
        Some(self.snapshot())
    }

    /// Change the pixel ratio cap. Returns the new surface when its size
    /// changes, `None` otherwise.
    pub fn set_max_pixel_ratio(&mut self, max_pixel_ratio: f64) -> Option<ViewportResize> {
        let before = self.surface_size();
        self.max_pixel_ratio = sanitize_ratio(max_pixel_ratio);
        (self.surface_size() != before).then(|| self.snapshot())
    }

    /// Current state as a resize event, for initial configuration.
    pub fn snapshot(&self) -> ViewportResize {
        ViewportResize {
            surface: self.surface_size(),
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            pixel_ratio: self.pixel_ratio(),
            aspect_ratio: self.aspect_ratio(),
        }
    }

    /// Pixel ratio used for the render surface: `min(device_pixel_ratio, max)`.
    pub fn pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.min(self.max_pixel_ratio)
    }

    /// Render surface size in physical pixels, at least 1×1.
    pub fn surface_size(&self) -> PhysicalSize {
        let ratio = self.pixel_ratio();
        PhysicalSize {
            width: ((self.logical_width * ratio).round() as u32).max(MIN_SURFACE_DIMENSION),
            height: ((self.logical_height * ratio).round() as u32).max(MIN_SURFACE_DIMENSION),
        }
    }

    /// Logical width over logical height. A zero height yields 1.0.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height > 0.0 {
            (self.logical_width / self.logical_height) as f32
        } else {
            1.0
        }
    }

    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Whether either logical dimension is zero (minimized window).
    pub fn is_empty(&self) -> bool {
        self.logical_width <= 0.0 || self.logical_height <= 0.0
    }
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_uses_device_ratio_below_cap() {
        let viewport = Viewport::new(1280.0, 720.0, 1.5, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(
            viewport.surface_size(),
            PhysicalSize {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_pixel_ratio_clamped_to_two() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(
            viewport.surface_size(),
            PhysicalSize {
                width: 1600,
                height: 1200
            }
        );
    }

    #[test]
    fn test_from_physical_recovers_logical_size() {
        let viewport = Viewport::from_physical(2880, 1800, 2.0, DEFAULT_MAX_PIXEL_RATIO);
        assert_eq!(viewport.logical_width(), 1440.0);
        assert_eq!(viewport.logical_height(), 900.0);
        assert_eq!(viewport.surface_size().width, 2880);
    }

    #[test]
    fn test_aspect_ratio_is_logical_width_over_height() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, DEFAULT_MAX_PIXEL_RATIO);
        let event = viewport.handle_resize(1000, 400).unwrap();
        assert_eq!(event.aspect_ratio, 2.5);
        assert_eq!(viewport.aspect_ratio(), 1000.0 / 400.0);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, DEFAULT_MAX_PIXEL_RATIO);
        let first = viewport.handle_resize(1024, 768);
        assert!(first.is_some());
        let state = viewport.clone();

        assert!(viewport.handle_resize(1024, 768).is_none());
        assert_eq!(viewport, state);
    }

    #[test]
    fn test_scale_factor_change_resizes_surface() {
        let mut viewport = Viewport::from_physical(1920, 1080, 1.0, DEFAULT_MAX_PIXEL_RATIO);
        let event = viewport.handle_scale_factor_changed(2.0, 3840, 2160).unwrap();
        assert_eq!(event.logical_width, 1920.0);
        assert_eq!(event.pixel_ratio, 2.0);
        assert_eq!(
            event.surface,
            PhysicalSize {
                width: 3840,
                height: 2160
            }
        );
    }

    #[test]
    fn test_scale_factor_above_cap_shrinks_surface() {
        let mut viewport = Viewport::from_physical(1000, 1000, 1.0, DEFAULT_MAX_PIXEL_RATIO);
        let event = viewport.handle_scale_factor_changed(4.0, 4000, 4000).unwrap();
        assert_eq!(
            event.surface,
            PhysicalSize {
                width: 2000,
                height: 2000
            }
        );
    }

    #[test]
    fn test_zero_dimensions_clamped_to_one() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0, DEFAULT_MAX_PIXEL_RATIO);
        viewport.handle_resize(0, 0);
        assert!(viewport.is_empty());
        assert_eq!(
            viewport.surface_size(),
            PhysicalSize {
                width: 1,
                height: 1
            }
        );
        assert_eq!(viewport.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_custom_cap() {
        let viewport = Viewport::new(100.0, 100.0, 2.0, 1.0);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        assert_eq!(viewport.surface_size().width, 100);
    }

    #[test]
    fn test_lowering_cap_shrinks_surface() {
        let mut viewport = Viewport::new(800.0, 600.0, 2.0, DEFAULT_MAX_PIXEL_RATIO);
        let event = viewport.set_max_pixel_ratio(1.0).unwrap();
        assert_eq!(event.pixel_ratio, 1.0);
        assert_eq!(
            event.surface,
            PhysicalSize {
                width: 800,
                height: 600
            }
        );
        assert!(viewport.set_max_pixel_ratio(1.0).is_none());
    }

    #[test]
    fn test_cap_above_device_ratio_changes_nothing() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.5, DEFAULT_MAX_PIXEL_RATIO);
        assert!(viewport.set_max_pixel_ratio(3.0).is_none());
        assert_eq!(viewport.pixel_ratio(), 1.5);
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_one() {
        let viewport = Viewport::new(640.0, 480.0, 0.0, f64::NAN);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        assert_eq!(viewport.surface_size().width, 640);
    }
}
