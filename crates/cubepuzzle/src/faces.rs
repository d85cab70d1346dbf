//! Sub-face labels and visibility masks.

use bitflags::bitflags;
use cubemath::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

/// Label of one of the six sub-faces of a cubelet, named by the outward
/// normal it has in the cubelet's own frame.
#[derive(Debug, EnumIter, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Right.
    PosX,
    /// Left.
    NegX,
    /// Up.
    PosY,
    /// Down.
    NegY,
    /// Front.
    PosZ,
    /// Back.
    NegZ,
}
impl Face {
    /// Returns an iterator over all faces, in mask order.
    pub fn iter() -> impl Iterator<Item = Face> {
        <Face as IntoEnumIterator>::iter()
    }

    /// Returns the face whose normal points along `axis`.
    pub const fn from_signed_axis(axis: SignedAxis) -> Face {
        match (axis.axis, axis.sign) {
            (Axis::X, Sign::Pos) => Face::PosX,
            (Axis::X, Sign::Neg) => Face::NegX,
            (Axis::Y, Sign::Pos) => Face::PosY,
            (Axis::Y, Sign::Neg) => Face::NegY,
            (Axis::Z, Sign::Pos) => Face::PosZ,
            (Axis::Z, Sign::Neg) => Face::NegZ,
        }
    }

    /// Returns the outward normal of the face as a signed axis.
    pub const fn signed_axis(self) -> SignedAxis {
        match self {
            Face::PosX => SignedAxis::new(Axis::X, Sign::Pos),
            Face::NegX => SignedAxis::new(Axis::X, Sign::Neg),
            Face::PosY => SignedAxis::new(Axis::Y, Sign::Pos),
            Face::NegY => SignedAxis::new(Axis::Y, Sign::Neg),
            Face::PosZ => SignedAxis::new(Axis::Z, Sign::Pos),
            Face::NegZ => SignedAxis::new(Axis::Z, Sign::Neg),
        }
    }

    /// Returns the outward unit normal of the face.
    pub fn normal(self) -> Vec3 {
        self.signed_axis().vector()
    }

    /// Returns the single-bit mask for this face.
    pub fn mask(self) -> FaceMask {
        FaceMask::from_bits_truncate(1 << self as u8)
    }
}

bitflags! {
    /// Set of visible sub-faces on a cubelet.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct FaceMask: u8 {
        const POS_X = 1 << 0;
        const NEG_X = 1 << 1;
        const POS_Y = 1 << 2;
        const NEG_Y = 1 << 3;
        const POS_Z = 1 << 4;
        const NEG_Z = 1 << 5;
    }
}
impl FaceMask {
    /// Returns the visibility mask for a cubelet whose home coordinate is
    /// `coord` in a lattice of `size` layers per axis.
    ///
    /// On each axis, an interior coordinate hides both faces and a boundary
    /// coordinate shows only the face pointing away from the center.
    pub fn for_home_coord(coord: [u8; 3], size: u8) -> FaceMask {
        let last = size.saturating_sub(1);
        let mut mask = FaceMask::empty();
        for axis in Axis::iter() {
            let c = coord[axis.index()];
            if c == last {
                mask |= Face::from_signed_axis(SignedAxis::new(axis, Sign::Pos)).mask();
            }
            if c == 0 {
                mask |= Face::from_signed_axis(SignedAxis::new(axis, Sign::Neg)).mask();
            }
        }
        mask
    }

    /// Returns whether `face` is visible.
    pub fn has(self, face: Face) -> bool {
        self.contains(face.mask())
    }

    /// Returns an iterator over the visible faces, in mask order.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::iter().filter(move |&f| self.has(f))
    }

    /// Returns the mask as six booleans ordered +x, -x, +y, -y, +z, -z.
    pub fn to_array(self) -> [bool; 6] {
        let mut ret = [false; 6];
        for face in Face::iter() {
            ret[face as usize] = self.has(face);
        }
        ret
    }
}
