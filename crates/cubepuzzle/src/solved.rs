//! Solved-state detection.

use cubemath::prelude::*;
use itertools::Itertools;

use crate::{Face, Lattice};

/// Returns whether every outer face of the lattice is solved.
///
/// The cubelets are grouped by home slice: for each of the six boundary
/// slices of the solved lattice, the cubelets that started there are
/// collected wherever they are now. Within a group, the sub-faces of each
/// label are compared to the first one found, in arena order, and the group
/// fails if any of them shares no coordinate with it. This test is
/// intentionally weak: it only checks that stickers of one color from one
/// home slice all lie in some common axis-aligned plane.
pub fn is_solved(lattice: &Lattice) -> bool {
    let last = lattice.size().saturating_sub(1);
    let solved = Axis::iter()
        .cartesian_product([0, last])
        .all(|(axis, layer)| is_slice_aligned(lattice, axis, layer));
    log::debug!("solved check: {solved}");
    solved
}

/// Returns whether the sub-faces of each label on the cubelets whose home
/// coordinate along `axis` is `layer` all share a coordinate with the first
/// sub-face of that label.
pub fn is_slice_aligned(lattice: &Lattice, axis: Axis, layer: u8) -> bool {
    let slice = lattice.cubelets_with_home_coordinate(axis, layer);
    let cubelet_size = lattice.cubelet_size();

    Face::iter().all(|face| {
        let mut positions = slice
            .iter()
            .map(|&id| &lattice[id])
            .filter(|c| c.faces.has(face))
            .map(|c| c.face_center(face, cubelet_size));
        let Some(first) = positions.next() else {
            return true;
        };
        positions.all(|p| shares_any_component(p, first))
    })
}
