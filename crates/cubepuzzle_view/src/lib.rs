//! Interactive session for an N×N×N cube puzzle, shared by frontends.
//!
//! The frontend owns the window, the clock, and ray casting. It feeds pointer
//! events and frame times into a [`PuzzleSimulation`] and draws whatever
//! [`PuzzleSimulation::render_data()`] returns, under
//! [`PuzzleSimulation::root_rotation()`].

mod animations;
mod drag;
mod game_state;
mod input;
mod simulation;

pub use drag::{DragPhase, PickedFace, WholeRotation};
pub use game_state::GameState;
pub use input::{CubeletHit, PointerDown, PointerMove};
pub use simulation::{CubeletRenderData, PuzzleSimulation};
