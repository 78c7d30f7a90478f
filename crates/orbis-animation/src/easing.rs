//! Easing curves mapping linear progress to eased progress.

/// Easing curve applied to tween progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Fast start, slow end: `1 - (1 - t)^2`.
    #[default]
    QuadOut,
    /// Stronger deceleration: `1 - (1 - t)^3`.
    CubicOut,
    /// Slow start, fast middle, slow end.
    QuadInOut,
}

impl Ease {
    /// Map progress in `0.0..=1.0` to an eased value. Input is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}
