//! Interpreting pointer drags as slice and whole-puzzle rotations.
//!
//! A drag starts on a sub-face of some cubelet. The face plane is fixed from
//! the hit point, and once the drag has moved far enough, its displacement
//! within that plane decides the rotation axis. The dominant direction of
//! the drag on screen decides how screen movement maps to angle.

use cubemath::prelude::*;

use crate::{CubeletId, Lattice};

/// Error selecting a slice to rotate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SliceSelectError {
    /// The drag direction does not determine a lattice axis.
    #[error("rotation axis {0:?} does not round to a lattice axis")]
    AmbiguousAxis([Float; 3]),
    /// The picked cubelet does not exist.
    #[error("no cubelet {0}")]
    UnknownCubelet(CubeletId),
}

/// Plane of the face that a drag started on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceFrame {
    /// World-space point where the pointer first hit the puzzle.
    pub hit_point: Point3,
    /// World axis normal to the face plane.
    pub normal: Axis,
    /// World axes spanning the face plane.
    pub in_plane: [Axis; 2],
}
impl FaceFrame {
    /// Returns the frame of the face plane through `hit_point`. The normal is
    /// the axis along which the hit point lies farthest from the center.
    pub fn from_hit(hit_point: Point3) -> Self {
        let normal = Axis::dominant(hit_point.to_vec());
        Self {
            hit_point,
            normal,
            in_plane: normal.in_plane(),
        }
    }

    /// Returns the world-space displacement, within the face plane, from the
    /// hit point to where `ray` crosses the plane.
    pub fn drag_displacement(&self, ray: &Ray) -> Option<Vec3> {
        let p = ray.intersect_plane(self.hit_point, self.normal.unit_vec3())?;
        Some(p - self.hit_point)
    }

    /// Returns the world-space rotation axis for a drag with displacement
    /// `displacement` within the face plane.
    ///
    /// The displacement is projected onto both in-plane axes and the longer
    /// projection is kept, so the result is always perpendicular to both the
    /// face normal and the dominant drag direction. Returns the zero vector
    /// if there is no displacement.
    pub fn world_rotation_axis(&self, displacement: Vec3) -> Vec3 {
        let [u, v] = self.in_plane.map(|axis| axis.unit_vec3() * axis.component(displacement));
        let dir = if u.magnitude2() > v.magnitude2() { u } else { v };
        if dir.magnitude2() == 0.0 {
            return Vec3::new(0.0, 0.0, 0.0);
        }
        self.normal.unit_vec3().cross(dir.normalize())
    }
}

/// Screen direction that controls the angle of a drag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveDir {
    /// Horizontal movement controls the angle.
    Horizontal(Sign),
    /// Vertical movement controls the angle.
    Vertical(Sign),
}
impl MoveDir {
    /// Returns the dominant direction of a screen-space drag, with its sign.
    /// Vertical wins ties.
    pub fn dominant(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            MoveDir::Horizontal(Sign::of(delta.x))
        } else {
            MoveDir::Vertical(Sign::of(delta.y))
        }
    }

    /// Returns the rotation angle, in radians, for a screen-space drag of
    /// `delta` from the start of the gesture.
    pub fn angle(self, delta: Vec2, radians_per_unit: Float) -> Float {
        match self {
            MoveDir::Horizontal(sign) => sign.float() * delta.x * radians_per_unit,
            MoveDir::Vertical(sign) => sign.float() * delta.y * radians_per_unit,
        }
    }
}

/// Slice chosen by a drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliceSelection {
    /// Rotation axis, in the lattice's local frame.
    pub axis: SignedAxis,
    /// Coordinate of the slice along `axis`.
    pub layer: u8,
    /// Screen direction that controls the angle.
    pub move_dir: MoveDir,
}

/// Chooses the slice to rotate for a drag that started on `picked`.
///
/// - `frame` is the face plane the drag started on.
/// - `displacement` is the world-space drag within that plane.
/// - `screen_delta` is the screen-space drag since the gesture started.
/// - `root_rotation` is the orientation of the whole puzzle in the world.
pub fn select_slice(
    lattice: &Lattice,
    picked: CubeletId,
    frame: &FaceFrame,
    displacement: Vec3,
    screen_delta: Vec2,
    root_rotation: Quat,
) -> Result<SliceSelection, SliceSelectError> {
    let cubelet = lattice
        .get(picked)
        .ok_or(SliceSelectError::UnknownCubelet(picked))?;

    let world_axis = frame.world_rotation_axis(displacement);
    let local_axis = root_rotation.conjugate() * world_axis;
    let axis = SignedAxis::from_rounded(local_axis)
        .ok_or(SliceSelectError::AmbiguousAxis(local_axis.into()))?;

    Ok(SliceSelection {
        axis,
        layer: cubelet.coord[axis.axis],
        move_dir: MoveDir::dominant(screen_delta),
    })
}

/// Whole-puzzle rotation chosen by a drag that did not start on the puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WholePuzzleSelection {
    /// World axis to rotate about.
    pub axis: Axis,
    /// Screen direction that controls the angle.
    pub move_dir: MoveDir,
}

/// Chooses the whole-puzzle rotation for a drag off the puzzle.
///
/// A mostly horizontal drag (vertical movement under `threshold - slack`)
/// spins about the vertical axis. Otherwise, a drag on the left half of the
/// viewport tilts about the X axis and one on the right half about the Z axis.
pub fn select_whole_puzzle(
    screen_delta: Vec2,
    pointer: Point2,
    viewport_width: Float,
    threshold: Float,
    slack: Float,
) -> WholePuzzleSelection {
    if screen_delta.y.abs() < threshold - slack {
        WholePuzzleSelection {
            axis: Axis::Y,
            move_dir: MoveDir::Horizontal(Sign::Pos),
        }
    } else if pointer.x < viewport_width * 0.5 {
        WholePuzzleSelection {
            axis: Axis::X,
            move_dir: MoveDir::Vertical(Sign::Neg),
        }
    } else {
        WholePuzzleSelection {
            axis: Axis::Z,
            move_dir: MoveDir::Vertical(Sign::Pos),
        }
    }
}

/// Returns whether a drag of `delta` has moved far enough to commit to a
/// rotation.
pub fn exceeds_threshold(delta: Vec2, threshold: Float) -> bool {
    delta.magnitude2() >= threshold * threshold
}

#[cfg(test)]
mod tests {
    use cubemath::assert_approx_eq;
    use cubemath::cgmath::Deg;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{DEFAULT_CUBELET_SIZE, RotationGroup};

    const RADIANS_PER_PIXEL: Float = std::f64::consts::PI / 360.0;

    #[test]
    fn test_face_frame() {
        let frame = FaceFrame::from_hit(Point3::new(3.0, 8.0, -2.5));
        assert_eq!(frame.normal, Axis::Y);
        assert_eq!(frame.in_plane, [Axis::Z, Axis::X]);

        let ray = Ray::new(Point3::new(10.0, 50.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        assert_approx_eq!(
            frame.drag_displacement(&ray).unwrap(),
            Vec3::new(7.0, 0.0, 2.5),
        );
    }

    #[test]
    fn test_world_rotation_axis() {
        let frame = FaceFrame::from_hit(Point3::new(1.0, 2.0, 12.0));
        // Dragging right across the front face turns about the vertical axis.
        assert_approx_eq!(
            frame.world_rotation_axis(Vec3::new(5.0, 1.0, 0.0)),
            Vec3::new(0.0, 1.0, 0.0),
        );
        // Dragging up turns about -x.
        assert_approx_eq!(
            frame.world_rotation_axis(Vec3::new(-1.0, 5.0, 0.0)),
            Vec3::new(-1.0, 0.0, 0.0),
        );
        assert_eq!(
            frame.world_rotation_axis(Vec3::new(0.0, 0.0, 0.0)),
            Vec3::new(0.0, 0.0, 0.0),
        );
    }

    #[test]
    fn test_select_slice() {
        let lattice = Lattice::new(3, DEFAULT_CUBELET_SIZE).unwrap();
        let picked = lattice.find("2,2,2").unwrap();
        let frame = FaceFrame::from_hit(Point3::new(9.0, 10.0, 12.0));
        let sel = select_slice(
            &lattice,
            picked,
            &frame,
            Vec3::new(6.0, -1.0, 0.0),
            Vec2::new(30.0, 4.0),
            identity_rotation(),
        )
        .unwrap();
        assert_eq!(sel.axis, SignedAxis::from(Axis::Y));
        assert_eq!(sel.layer, 2);
        assert_eq!(sel.move_dir, MoveDir::Horizontal(Sign::Pos));

        let group = RotationGroup::new(&lattice, sel.axis, sel.layer);
        assert_eq!(group.members().len(), 9);
        assert!(group.contains(picked));
    }

    #[test]
    fn test_select_slice_in_rotated_puzzle() {
        let lattice = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
        let picked = lattice.find("0,1,1").unwrap();
        let frame = FaceFrame::from_hit(Point3::new(-2.0, 3.0, 8.0));
        // Puzzle spun a quarter turn about the vertical axis, so world Y is
        // still local Y but the front face is the local -x face.
        let root = Quat::from_angle_y(Deg(90.0));
        let sel = select_slice(
            &lattice,
            picked,
            &frame,
            Vec3::new(0.0, -6.0, 0.0),
            Vec2::new(1.0, 25.0),
            root,
        )
        .unwrap();
        // World axis is +z × -y = +x, which is local +z.
        assert_eq!(sel.axis, SignedAxis::from(Axis::Z));
        assert_eq!(sel.layer, 1);
        assert_eq!(sel.move_dir, MoveDir::Vertical(Sign::Pos));
    }

    #[test]
    fn test_ambiguous_axis_is_rejected() {
        let lattice = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
        let picked = lattice.find("1,1,1").unwrap();
        let frame = FaceFrame::from_hit(Point3::new(2.0, 2.0, 8.0));
        let root = Quat::from_angle_y(Deg(45.0));
        let result = select_slice(
            &lattice,
            picked,
            &frame,
            Vec3::new(0.0, 5.0, 0.0),
            Vec2::new(0.0, 30.0),
            root,
        );
        assert!(matches!(result, Err(SliceSelectError::AmbiguousAxis(_))));

        let result = select_slice(
            &lattice,
            picked,
            &frame,
            Vec3::new(0.0, 0.0, 0.0),
            Vec2::new(0.0, 30.0),
            identity_rotation(),
        );
        assert!(matches!(result, Err(SliceSelectError::AmbiguousAxis(_))));
    }

    #[test]
    fn test_move_dir_angle() {
        let dir = MoveDir::dominant(Vec2::new(-40.0, 10.0));
        assert_eq!(dir, MoveDir::Horizontal(Sign::Neg));
        // Dragging 180 units opposite the committed direction is a positive
        // quarter turn.
        assert_approx_eq!(
            dir.angle(Vec2::new(-180.0, 0.0), RADIANS_PER_PIXEL),
            QUARTER_TURN,
        );
        assert_eq!(MoveDir::dominant(Vec2::new(5.0, 5.0)), MoveDir::Vertical(Sign::Pos));
    }

    #[test]
    fn test_select_whole_puzzle() {
        let sel = select_whole_puzzle(Vec2::new(30.0, 17.0), Point2::new(100.0, 0.0), 800.0, 20.0, 2.0);
        assert_eq!(sel.axis, Axis::Y);
        assert_eq!(sel.move_dir, MoveDir::Horizontal(Sign::Pos));

        let sel = select_whole_puzzle(Vec2::new(3.0, 18.0), Point2::new(100.0, 0.0), 800.0, 20.0, 2.0);
        assert_eq!(sel.axis, Axis::X);
        assert_eq!(sel.move_dir, MoveDir::Vertical(Sign::Neg));

        let sel = select_whole_puzzle(Vec2::new(3.0, -25.0), Point2::new(500.0, 0.0), 800.0, 20.0, 2.0);
        assert_eq!(sel.axis, Axis::Z);
        assert_eq!(sel.move_dir, MoveDir::Vertical(Sign::Pos));
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold(Vec2::new(12.0, 15.9), 20.0));
        assert!(exceeds_threshold(Vec2::new(12.0, 16.0), 20.0));
    }
}
