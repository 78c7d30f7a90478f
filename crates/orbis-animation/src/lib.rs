//! Easing curves and time-based tweens.

pub mod easing;
pub mod tween;

pub use easing::Ease;
pub use tween::{Tween, Tweener};
