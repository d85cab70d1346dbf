//! Approximate comparison functions that automatically use [`EPSILON`].

use crate::{EPSILON, Float, Vec3};

/// Compares two numbers, but considers them equal if they are separated by less
/// than `EPSILON`.
pub fn approx_eq(a: Float, b: Float) -> bool {
    a == b || (a - b).abs() < EPSILON
}

/// Returns whether `x` has an absolute value at least `EPSILON`.
pub fn is_approx_nonzero(x: Float) -> bool {
    !approx_eq(x, 0.0)
}

/// Returns whether two vectors agree, within `EPSILON`, on at least one of
/// their three components.
pub fn shares_any_component(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) || approx_eq(a.y, b.y) || approx_eq(a.z, b.z)
}
