//! Pointer events supplied by the windowing layer.

use cubemath::prelude::*;
use cubepuzzle::CubeletId;
use web_time::Duration;

/// Result of casting a pointer ray against the puzzle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeletHit {
    /// Cubelet that was hit.
    pub cubelet: CubeletId,
    /// Ray parameter of the hit point, which is `ray.at(distance)`. This is
    /// a true distance only when the ray direction is normalized.
    pub distance: Float,
}

/// Pointer pressed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerDown {
    /// Screen position of the pointer.
    pub screen: Point2,
    /// World-space ray through the pointer.
    pub ray: Ray,
    /// Nearest cubelet under the pointer, if any.
    pub hit: Option<CubeletHit>,
    /// Time of the event, measured from any fixed instant.
    pub time: Duration,
}
impl PointerDown {
    /// Returns the world-space point where the pointer hit the puzzle.
    pub fn hit_point(&self) -> Option<Point3> {
        self.hit.map(|hit| self.ray.at(hit.distance))
    }
}

/// Pointer moved while pressed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMove {
    /// Screen position of the pointer.
    pub screen: Point2,
    /// World-space ray through the pointer.
    pub ray: Ray,
}
