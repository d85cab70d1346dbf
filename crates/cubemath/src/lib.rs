//! 3D vector, quaternion, and axis-aligned snapping primitives for cube
//! puzzles.
//!
//! Everything here is a thin layer over [`cgmath`] using [`Float`] scalars.

pub use {approx, cgmath};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons of positions on the
/// lattice.
pub const EPSILON: Float = 0.0001;

/// Angle of a quarter turn, in radians.
pub const QUARTER_TURN: Float = std::f64::consts::FRAC_PI_2;

/// 2D screen-space vector.
pub type Vec2 = cgmath::Vector2<Float>;
/// 3D vector.
pub type Vec3 = cgmath::Vector3<Float>;
/// 2D screen-space point.
pub type Point2 = cgmath::Point2<Float>;
/// 3D point.
pub type Point3 = cgmath::Point3<Float>;
/// Unit quaternion representing a 3D rotation.
pub type Quat = cgmath::Quaternion<Float>;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

pub mod approx_cmp;
pub mod axis;
pub mod ray;
pub mod sign;
pub mod snap;

pub use axis::{Axis, SignedAxis};
pub use ray::Ray;
pub use sign::Sign;

/// Structs, traits, and constants.
pub mod prelude {
    pub use cgmath::prelude::*;

    pub use crate::approx_cmp::*;
    pub use crate::axis::{Axis, SignedAxis};
    pub use crate::ray::Ray;
    pub use crate::sign::Sign;
    pub use crate::snap::*;
    pub use crate::{
        EPSILON, Float, Point2, Point3, QUARTER_TURN, Quat, Vec2, Vec3, identity_rotation,
    };
}

/// Returns the identity rotation.
pub fn identity_rotation() -> Quat {
    Quat::new(1.0, 0.0, 0.0, 0.0)
}
