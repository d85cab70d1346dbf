use std::f64::consts::PI;

use cubemath::cgmath::Rad;
use cubemath::prelude::*;
use web_time::Duration;

// Use cosine from 0.0 to PI for interpolation.
const INTERPOLATION_FN: fn(Float) -> Float = |x| (1.0 - (x * PI).cos()) / 2.0;

/// Decorative spin of the whole puzzle about the vertical axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAnimation {
    base: Quat,
    total_angle: Float,
    duration: Duration,
    elapsed: Duration,
}
impl SpinAnimation {
    /// Constructs a spin by `total_angle` radians starting from orientation
    /// `base`.
    pub fn new(base: Quat, total_angle: Float, duration: Duration) -> Self {
        Self {
            base,
            total_angle,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Steps the animation forward. Returns whether it has finished.
    pub fn proceed(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.elapsed >= self.duration
    }

    /// Returns the current orientation of the puzzle.
    pub fn rotation(&self) -> Quat {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        Quat::from_angle_y(Rad(INTERPOLATION_FN(t) * self.total_angle)) * self.base
    }
}
