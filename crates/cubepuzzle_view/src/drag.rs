//! State of the pointer gesture in progress.

use cubemath::cgmath::Rad;
use cubemath::prelude::*;
use cubepuzzle::{CubeletId, FaceFrame, MoveDir, RotationGroup};

/// Cubelet face that a gesture started on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickedFace {
    /// Cubelet under the pointer.
    pub cubelet: CubeletId,
    /// Plane of the face that was hit.
    pub frame: FaceFrame,
}

/// Rotation of the whole puzzle about a fixed world axis, measured from its
/// orientation when the gesture committed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WholeRotation {
    base: Quat,
    local_axis: Vec3,
}
impl WholeRotation {
    /// Constructs a rotation about `world_axis` starting from orientation
    /// `base`.
    pub fn new(base: Quat, world_axis: Vec3) -> Self {
        Self {
            base,
            local_axis: base.conjugate() * world_axis,
        }
    }

    /// Returns the orientation after rotating by `angle` radians.
    pub fn at(&self, angle: Float) -> Quat {
        self.base * Quat::from_axis_angle(self.local_axis, Rad(angle))
    }
}

/// Phase of the pointer gesture in progress.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// Pointer is down but has not moved far enough to commit.
    AwaitingThreshold {
        /// Screen position where the gesture started.
        start: Point2,
        /// Face the gesture started on, or `None` if it started off the
        /// puzzle.
        pick: Option<PickedFace>,
    },
    /// A slice is following the pointer.
    RotatingSlice {
        /// Screen position where the gesture started.
        start: Point2,
        /// Slice being rotated.
        group: RotationGroup,
        /// Screen direction that controls the angle.
        move_dir: MoveDir,
    },
    /// The whole puzzle is following the pointer.
    RotatingWhole {
        /// Screen position where the gesture started.
        start: Point2,
        /// Rotation being applied.
        rotation: WholeRotation,
        /// Screen direction that controls the angle.
        move_dir: MoveDir,
        /// Current angle, in radians.
        angle: Float,
    },
    /// The gesture could not be interpreted and is ignored until release.
    Dropped,
}
impl DragPhase {
    /// Returns the slice being rotated, if any.
    pub fn group(&self) -> Option<&RotationGroup> {
        match self {
            DragPhase::RotatingSlice { group, .. } => Some(group),
            _ => None,
        }
    }
}
