//! Wall-clock frame timing.
//!
//! Measures the time between redraws and clamps long frames (a window drag,
//! a debugger pause) so animations resume smoothly instead of jumping.

use std::time::Instant;
use tracing::warn;

/// Longest frame time passed on to the frame loop.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct FrameClock {
    previous_time: Instant,
    total_time: f64,
    frame_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the time since the previous call and count a frame.
    pub fn tick(&mut self) -> f64 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.advance(frame_time)
    }

    /// Count a frame of `frame_time` seconds. Returns the clamped time.
    pub fn advance(&mut self, frame_time: f64) -> f64 {
        let dt = if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time.max(0.0)
        };
        self.total_time += dt;
        self.frame_count += 1;
        dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of clamped frame times in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Average frames per second over the clamped total time.
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
