use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationPreferences {
    /// Time taken to settle a released slice, per quarter turn of distance.
    pub snap_seconds_per_quarter_turn: f64,
    /// Time taken by each quarter turn of a shuffle.
    pub shuffle_turn_seconds: f64,
    /// Time taken by the full spin that re-orients the puzzle before
    /// resuming a game.
    pub reorient_seconds: f64,
}

impl AnimationPreferences {
    pub fn snap_per_quarter_turn(&self) -> Duration {
        secs(self.snap_seconds_per_quarter_turn)
    }
    pub fn shuffle_turn_duration(&self) -> Duration {
        secs(self.shuffle_turn_seconds)
    }
    pub fn reorient_duration(&self) -> Duration {
        secs(self.reorient_seconds)
    }
}

/// Converts seconds to a duration, treating invalid values as zero.
fn secs(s: f64) -> Duration {
    Duration::try_from_secs_f64(s).unwrap_or_default()
}
