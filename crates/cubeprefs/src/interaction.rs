use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InteractionPreferences {
    /// Screen distance a drag must cover before it commits to a rotation.
    pub drag_threshold: f64,
    /// Rotation per unit of screen drag.
    pub drag_degrees_per_pixel: f64,
    /// Maximum time between the taps of a double tap.
    pub double_tap_ms: u64,
    /// A drag off the puzzle spins about the vertical axis if its vertical
    /// movement is less than `drag_threshold` minus this.
    pub whole_puzzle_vertical_slack: f64,
}

impl InteractionPreferences {
    pub fn radians_per_pixel(&self) -> f64 {
        self.drag_degrees_per_pixel.to_radians()
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }
}
