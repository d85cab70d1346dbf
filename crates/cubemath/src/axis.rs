//! Principal axes of 3D space.

use std::fmt;
use std::ops::Neg;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{Float, Sign, Vec3};

/// Principal axis.
#[derive(Debug, Display, EnumIter, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Iterator<Item = Axis> {
        <Axis as IntoEnumIterator>::iter()
    }

    /// Returns the index of the axis, which is also the index of the
    /// corresponding vector component.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis with the given component index.
    pub const fn from_index(i: usize) -> Option<Axis> {
        match i {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vec3 {
        match self {
            Axis::X => Vec3::unit_x(),
            Axis::Y => Vec3::unit_y(),
            Axis::Z => Vec3::unit_z(),
        }
    }

    /// Returns the two axes spanning the plane perpendicular to this one, in
    /// cyclic order. (The cross product of the returned axes is this axis.)
    pub const fn in_plane(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::Z, Axis::X],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vec3) -> Float {
        v[self.index()]
    }

    /// Returns the axis along which `v` has the largest absolute component.
    ///
    /// X wins only if strictly larger than both others, then Y likewise;
    /// everything else resolves to Z.
    pub fn dominant(v: Vec3) -> Axis {
        let [x, y, z] = [v.x.abs(), v.y.abs(), v.z.abs()];
        if x > y && x > z {
            Axis::X
        } else if y > x && y > z {
            Axis::Y
        } else {
            Axis::Z
        }
    }
}

/// Principal axis with a direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SignedAxis {
    /// Unsigned axis.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}
impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Neg => write!(f, "-{}", self.axis),
            Sign::Pos => write!(f, "+{}", self.axis),
        }
    }
}
impl Neg for SignedAxis {
    type Output = SignedAxis;

    fn neg(self) -> SignedAxis {
        SignedAxis {
            axis: self.axis,
            sign: -self.sign,
        }
    }
}
impl From<Axis> for SignedAxis {
    fn from(axis: Axis) -> Self {
        Self::new(axis, Sign::Pos)
    }
}
impl SignedAxis {
    /// Constructs a signed axis.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Returns the unit vector pointing along the axis in its direction.
    pub fn vector(self) -> Vec3 {
        self.axis.unit_vec3() * self.sign.float()
    }

    /// Rounds each component of `v` to the nearest integer and returns the
    /// signed axis it names, or `None` if the rounded vector is not a signed
    /// unit vector along a principal axis.
    pub fn from_rounded(v: Vec3) -> Option<Self> {
        let rounded = crate::snap::round_vec3(v);
        let mut ret = None;
        for axis in Axis::iter() {
            match axis.component(rounded) {
                0.0 => (),
                1.0 if ret.is_none() => ret = Some(Self::new(axis, Sign::Pos)),
                -1.0 if ret.is_none() => ret = Some(Self::new(axis, Sign::Neg)),
                _ => return None,
            }
        }
        ret
    }
}
