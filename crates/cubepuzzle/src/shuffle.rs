//! Random shuffle sequences.

use cubemath::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One quarter turn of a shuffle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShuffleStep {
    /// Axis to turn about.
    pub axis: Axis,
    /// Direction of the quarter turn.
    pub direction: Sign,
    /// Coordinate of the slice along `axis`.
    pub layer: u8,
}
impl ShuffleStep {
    /// Returns the signed rotation axis of the step.
    pub fn signed_axis(self) -> SignedAxis {
        SignedAxis::new(self.axis, self.direction)
    }
}

/// Returns the number of quarter turns in a shuffle of a cube with `size`
/// layers per axis.
pub fn shuffle_len(size: u8) -> usize {
    3 * size as usize * size as usize
}

/// Generates a random shuffle for a cube with `size` layers per axis.
///
/// No step turns the same slice on the same axis as the step before it; when
/// the random draw would, the layer is advanced by one (wrapping).
pub fn generate_shuffle<R: Rng + ?Sized>(size: u8, rng: &mut R) -> Vec<ShuffleStep> {
    const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
    const DIRECTIONS: [Sign; 2] = [Sign::Neg, Sign::Pos];

    let size = size.max(1);
    let mut prev: Option<(Axis, u8)> = None;
    let steps = (0..shuffle_len(size))
        .map(|_| {
            let axis = *AXES.choose(rng).unwrap_or(&Axis::X);
            let direction = *DIRECTIONS.choose(rng).unwrap_or(&Sign::Pos);
            let mut layer = rng.random_range(0..size);
            if prev == Some((axis, layer)) {
                layer = (layer + 1) % size;
            }
            prev = Some((axis, layer));
            ShuffleStep {
                axis,
                direction,
                layer,
            }
        })
        .collect();
    log::debug!("generated shuffle of {} steps for size {size}", shuffle_len(size));
    steps
}
