//! Snapping of angles, vectors, and rotations onto the cube's symmetry grid.

use cgmath::Matrix3;
use float_ord::FloatOrd;
use itertools::iproduct;

use crate::{Axis, Float, QUARTER_TURN, Quat, Sign, Vec3};

/// Returns the multiple of a quarter turn nearest to `angle` (in radians).
/// Halfway cases round away from zero.
pub fn snap_to_quarter_turn(angle: Float) -> Float {
    (angle / QUARTER_TURN).round() * QUARTER_TURN
}

/// Rounds each component of a vector to the nearest integer.
pub fn round_vec3(v: Vec3) -> Vec3 {
    Vec3::new(v.x.round(), v.y.round(), v.z.round())
}

/// Returns the axis-aligned rotation nearest to `rot`.
///
/// The rotation matrix is snapped greedily: the entry with the largest
/// magnitude fixes one column onto a signed principal axis, then the next
/// largest among the remaining rows and columns, and so on. The last column is
/// recomputed as a cross product so that the result is always a proper
/// rotation. For any rotation within 45 degrees of one of the 24 orientations
/// of a cube, this is the same as rounding each Euler angle to the nearest
/// multiple of 90 degrees.
pub fn snap_rotation(rot: Quat) -> Quat {
    let m = Matrix3::from(rot);

    let mut entries: Vec<(usize, usize, Float)> =
        iproduct!(0..3, 0..3).map(|(c, r)| (c, r, m[c][r])).collect();
    entries.sort_by_key(|&(_, _, value)| std::cmp::Reverse(FloatOrd(value.abs())));

    let mut cols: [Option<Vec3>; 3] = [None; 3];
    let mut rows_used = [false; 3];
    for (c, r, value) in entries {
        if cols[c].is_some() || rows_used[r] {
            continue;
        }
        let Some(axis) = Axis::from_index(r) else {
            continue;
        };
        cols[c] = Some(axis.unit_vec3() * Sign::of(value).float());
        rows_used[r] = true;
    }

    let [Some(x), Some(y), Some(_)] = cols else {
        // Only reachable with non-finite input.
        return crate::identity_rotation();
    };
    Quat::from(Matrix3::from_cols(x, y, x.cross(y)))
}
