//! User preferences for cube puzzle interaction and animation.
//!
//! Defaults live in `default.yaml`, which is compiled in. A user preferences
//! file, if any, is layered on top of it, so it only needs to list the values
//! that differ.

#![allow(missing_docs)] // fields are documented; accessors are self-explanatory

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use cubepuzzle::{MAX_SIZE, MIN_SIZE};
use eyre::{Result, ensure};
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    pub puzzle: PuzzlePreferences,
    pub interaction: InteractionPreferences,
    pub animation: AnimationPreferences,
}
impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzlePreferences {
    /// Number of layers per axis when there is no saved game.
    pub default_cube_size: u8,
    /// Edge length of one cubelet, which is also the lattice spacing.
    pub cubelet_size: f64,
}

impl Preferences {
    /// Loads preferences, layering the file at `user_file` (if any) over the
    /// defaults. Falls back to the defaults if anything goes wrong.
    pub fn load(user_file: Option<&Path>) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));
        if let Some(path) = user_file {
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }

        config
            .build()
            .and_then(|c| c.try_deserialize::<Preferences>())
            .map_err(eyre::Report::from)
            .and_then(Preferences::validate)
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences: {e}");
                Self::default()
            })
    }

    /// Writes preferences to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        Ok(())
    }

    /// Returns the preferences if every value is usable.
    pub fn validate(self) -> Result<Self> {
        let size = self.puzzle.default_cube_size;
        ensure!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "default cube size {size} is out of range {MIN_SIZE}..={MAX_SIZE}",
        );
        ensure!(
            self.puzzle.cubelet_size.is_finite() && self.puzzle.cubelet_size > 0.0,
            "cubelet size must be positive",
        );
        ensure!(
            self.interaction.drag_threshold >= self.interaction.whole_puzzle_vertical_slack,
            "drag threshold must be at least the vertical slack",
        );
        ensure!(
            self.interaction.drag_degrees_per_pixel.is_finite(),
            "drag sensitivity must be finite",
        );
        Ok(self)
    }
}
