//! Rays cast from the camera into the scene.

use cgmath::prelude::*;

use crate::approx_cmp::is_approx_nonzero;
use crate::{Float, Point3, Vec3};

/// Half-line with an origin and a direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Start point of the ray.
    pub origin: Point3,
    /// Direction of the ray. This need not be normalized.
    pub direction: Vec3,
}
impl Ray {
    /// Constructs a ray.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at parameter `t` along the ray.
    pub fn at(&self, t: Float) -> Point3 {
        self.origin + self.direction * t
    }

    /// Returns the point where the infinite line of this ray crosses the
    /// plane through `point` with normal `normal`, or `None` if the ray is
    /// parallel to the plane.
    pub fn intersect_plane(&self, point: Point3, normal: Vec3) -> Option<Point3> {
        let denom = self.direction.dot(normal);
        if !is_approx_nonzero(denom) {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        Some(self.at(t))
    }
}
