//! Serialized records.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use cubemath::prelude::*;
use cubepuzzle::{CubeletTransform, Lattice, LatticeCoord};
use serde::{Deserialize, Serialize};

/// Error loading saved cubelet state.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    /// The saved data is not valid JSON for the expected records.
    #[error("malformed cubelet records: {0}")]
    Json(#[from] serde_json::Error),
    /// The saved data has a different number of cubelets than the lattice.
    #[error("expected {expected} cubelet records, found {found}")]
    CountMismatch {
        /// Number of cubelets in the lattice.
        expected: usize,
        /// Number of saved records.
        found: usize,
    },
    /// A saved record names a cubelet that the lattice does not have.
    #[error("no cubelet with id {0:?}")]
    UnknownCubelet(String),
    /// A saved record's home coordinate disagrees with its id.
    #[error("cubelet {0:?} has mismatched home coordinate")]
    HomeMismatch(String),
    /// A saved record's rotation cannot be normalized.
    #[error("cubelet {0:?} has a degenerate rotation")]
    BadRotation(String),
    /// A saved record's position is not the center of a lattice slot.
    #[error("cubelet {0:?} is not on a lattice slot")]
    OffLattice(String),
    /// Two saved records have the same id.
    #[error("cubelet {0:?} appears more than once")]
    DuplicateCubelet(String),
    /// A saved record is in a slot already taken by an earlier record.
    #[error("cubelet {id:?} shares slot {coord:?} with another cubelet")]
    SlotTaken {
        /// Id of the later record.
        id: String,
        /// Contested slot.
        coord: LatticeCoord,
    },
}

/// Saved transform of one cubelet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CubeletRecord {
    /// Stable identifier of the cubelet, `"x,y,z"`.
    pub cube_id: String,
    /// Home coordinate of the cubelet.
    pub f_id: [i32; 3],
    /// Position relative to the lattice root.
    pub pos: [Float; 3],
    /// Orientation as a quaternion `[x, y, z, w]`.
    pub rot: [Float; 4],
    /// Scale.
    pub scale: [Float; 3],
}

/// Returns a record for every cubelet in the lattice, in arena order.
pub fn encode_lattice(lattice: &Lattice) -> Vec<CubeletRecord> {
    lattice
        .iter()
        .map(|(_, c)| {
            let t = &c.transform;
            CubeletRecord {
                cube_id: c.name.clone(),
                f_id: c.home.0.map(i32::from),
                pos: t.position.into(),
                rot: [t.rotation.v.x, t.rotation.v.y, t.rotation.v.z, t.rotation.s],
                scale: t.scale.into(),
            }
        })
        .collect()
}

/// Serializes the lattice to a JSON array of cubelet records.
pub fn lattice_to_json(lattice: &Lattice) -> serde_json::Result<String> {
    serde_json::to_string(&encode_lattice(lattice))
}

/// Applies saved records to the lattice.
///
/// Every cubelet must appear exactly once, centered on its own slot. All
/// records are validated before any is applied, so on error the lattice is
/// unchanged.
pub fn decode_into_lattice(records: &[CubeletRecord], lattice: &mut Lattice) -> Result<(), LoadError> {
    if records.len() != lattice.len() {
        return Err(LoadError::CountMismatch {
            expected: lattice.len(),
            found: records.len(),
        });
    }

    let mut seen_ids = HashSet::new();
    let mut seen_coords = HashSet::new();
    let mut updates = Vec::with_capacity(records.len());
    for r in records {
        let id = lattice
            .find(&r.cube_id)
            .ok_or_else(|| LoadError::UnknownCubelet(r.cube_id.clone()))?;
        if !seen_ids.insert(id) {
            return Err(LoadError::DuplicateCubelet(r.cube_id.clone()));
        }
        let home = LatticeCoord(r.f_id.map(|c| u8::try_from(c).unwrap_or(u8::MAX)));
        if lattice[id].home != home {
            return Err(LoadError::HomeMismatch(r.cube_id.clone()));
        }

        let position = Vec3::from(r.pos);
        let coord = lattice.offset_to_coord(position);
        let error = lattice.coord_to_offset(coord) - position;
        if ![error.x, error.y, error.z].iter().all(|e| e.abs() < EPSILON) {
            return Err(LoadError::OffLattice(r.cube_id.clone()));
        }
        if !seen_coords.insert(coord) {
            return Err(LoadError::SlotTaken {
                id: r.cube_id.clone(),
                coord,
            });
        }

        let [x, y, z, w] = r.rot;
        let rotation = Quat::new(w, x, y, z);
        if !(rotation.magnitude2() > EPSILON) {
            return Err(LoadError::BadRotation(r.cube_id.clone()));
        }
        let transform = CubeletTransform {
            position,
            rotation: rotation.normalize(),
            scale: r.scale.into(),
        };
        updates.push((id, transform));
    }

    for (id, transform) in updates {
        lattice.set_transform(id, transform);
    }
    Ok(())
}

/// Parses a JSON array of cubelet records and applies it to the lattice.
///
/// On error, the lattice is unchanged.
pub fn lattice_from_json(s: &str, lattice: &mut Lattice) -> Result<(), LoadError> {
    let records: Vec<CubeletRecord> = serde_json::from_str(s)?;
    decode_into_lattice(&records, lattice)
}

/// Persistent information about the game in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    /// Seconds spent solving the current shuffle.
    pub game_time: Float,
    /// Number of layers per axis.
    pub cube_size: u8,
}
impl Default for GameInfo {
    fn default() -> Self {
        Self {
            game_time: 0.0,
            cube_size: 2,
        }
    }
}

/// Completed solve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    /// Seconds the solve took.
    pub game_time: Float,
    /// When the solve finished, in milliseconds since the Unix epoch.
    pub time: i64,
    /// Number of layers per axis.
    pub cube_size: u8,
}
impl RankEntry {
    /// Constructs an entry for a solve that finished just now.
    pub fn now(game_time: Float, cube_size: u8) -> Self {
        Self {
            game_time,
            time: Utc::now().timestamp_millis(),
            cube_size,
        }
    }

    /// Returns when the solve finished.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

/// List of completed solves, fastest first.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct RankList(Vec<RankEntry>);
impl RankList {
    /// Adds a solve, keeping the list sorted by solve time. Solves with equal
    /// times keep the order they were added in.
    pub fn insert(&mut self, entry: RankEntry) {
        self.0.push(entry);
        self.0.sort_by(|a, b| a.game_time.total_cmp(&b.game_time));
    }

    /// Returns all solves, fastest first.
    pub fn entries(&self) -> &[RankEntry] {
        &self.0
    }

    /// Returns the fastest solve of a cube with `cube_size` layers per axis.
    pub fn best_for_size(&self, cube_size: u8) -> Option<&RankEntry> {
        self.0.iter().find(|e| e.cube_size == cube_size)
    }
}
