//! N×N×N twisty cube model: a lattice of cubelets, slice selection from
//! pointer drags, slice rotation with re-homing, solve detection, and
//! shuffle generation.
//!
//! Nothing in this crate knows about frames or time except through the
//! explicit [`Duration`](web_time::Duration) passed to animations.

mod faces;
mod lattice;
mod rotation;
pub mod select;
mod shuffle;
mod solved;

pub use faces::{Face, FaceMask};
pub use lattice::*;
pub use rotation::{AngleAnimation, RotationGroup};
pub use select::{FaceFrame, MoveDir, SliceSelectError, SliceSelection, WholePuzzleSelection};
pub use shuffle::{ShuffleStep, generate_shuffle, shuffle_len};
pub use solved::{is_slice_aligned, is_solved};
