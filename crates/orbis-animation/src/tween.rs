//! Two-component tweens over wall-clock time.
//!
//! A [`Tweener`] holds at most one active tween. Starting a new one replaces
//! the old one, beginning from whatever value is current at that moment, so
//! a rapidly changing target restarts the motion rather than queuing it.

use glam::Vec2;

use crate::easing::Ease;

/// Interpolates from `from` to `to` over `duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: Vec2,
    to: Vec2,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    /// A non-positive duration completes on the first advance.
    pub fn new(from: Vec2, to: Vec2, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.elapsed > 0.0 { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.duration).min(1.0)
    }

    pub fn value(&self) -> Vec2 {
        let t = self.ease.apply(self.progress());
        self.from.lerp(self.to, t)
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        if dt > 0.0 {
            self.elapsed += dt;
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn target(&self) -> Vec2 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

/// Slot for the single active tween of one property.
#[derive(Clone, Debug)]
pub struct Tweener {
    duration: f32,
    ease: Ease,
    active: Option<Tween>,
}

impl Tweener {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            active: None,
        }
    }

    /// Start a tween from `current` toward `target`, replacing any active one.
    pub fn start(&mut self, current: Vec2, target: Vec2) {
        if let Some(previous) = self.active.as_ref().filter(|t| !t.is_finished()) {
            log::trace!(
                "Tween toward {:?} replaced at {:.0}%",
                previous.target(),
                previous.progress() * 100.0
            );
        }
        self.active = Some(Tween::new(current, target, self.duration, self.ease));
    }

    /// Advance the active tween. `None` when nothing has been started.
    pub fn advance(&mut self, dt: f32) -> Option<Vec2> {
        self.active.as_mut().map(|tween| tween.advance(dt))
    }

    pub fn active(&self) -> Option<&Tween> {
        self.active.as_ref()
    }

    pub fn set_ease(&mut self, ease: Ease) {
        self.ease = ease;
    }

    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
    }
}
