//! Lattice of cubelets making up an N×N×N cube.

use std::fmt;
use std::ops::Index;

use cubemath::prelude::*;
use itertools::iproduct;

use crate::{Face, FaceMask};

/// Smallest supported number of layers per axis.
pub const MIN_SIZE: u8 = 2;
/// Largest supported number of layers per axis.
pub const MAX_SIZE: u8 = 9;
/// Default edge length of one cubelet, which is also the spacing of the
/// lattice.
pub const DEFAULT_CUBELET_SIZE: Float = 8.0;

/// Error constructing a lattice.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Requested size is unsupported.
    #[error("cube size {size} is out of range {MIN_SIZE}..={MAX_SIZE}")]
    SizeOutOfRange {
        /// Requested size.
        size: u8,
    },
    /// Cubelet spacing is not a positive finite number.
    #[error("cubelet size {0} must be positive and finite")]
    BadCubeletSize(Float),
}

/// Index of a cubelet in a [`Lattice`].
///
/// Indices are stable until the lattice is rebuilt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeletId(pub u16);
impl fmt::Display for CubeletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer grid coordinate of a cubelet, from `0` to `size - 1` on each axis.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticeCoord(pub [u8; 3]);
impl Index<Axis> for LatticeCoord {
    type Output = u8;

    fn index(&self, axis: Axis) -> &u8 {
        &self.0[axis.index()]
    }
}
impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "{x},{y},{z}")
    }
}

/// Position, orientation, and scale of a cubelet relative to the lattice
/// root.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CubeletTransform {
    /// Center of the cubelet.
    pub position: Vec3,
    /// Orientation of the cubelet.
    pub rotation: Quat,
    /// Scale of the cubelet.
    pub scale: Vec3,
}

/// One small cube of the lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Cubelet {
    /// Stable identifier `"x,y,z"`, taken from the home coordinate.
    pub name: String,
    /// Coordinate the cubelet was built at.
    pub home: LatticeCoord,
    /// Current coordinate, recomputed whenever the cubelet is re-homed.
    pub coord: LatticeCoord,
    /// Current transform relative to the lattice root.
    pub transform: CubeletTransform,
    /// Sub-faces that are visible (and therefore carry a sticker).
    pub faces: FaceMask,
}
impl Cubelet {
    /// Returns the position of the center of sub-face `face`, relative to the
    /// lattice root.
    pub fn face_center(&self, face: Face, cubelet_size: Float) -> Vec3 {
        let t = &self.transform;
        t.position + t.rotation * (face.normal() * (cubelet_size / 2.0))
    }
}

/// N×N×N lattice of cubelets, stored as an arena indexed by [`CubeletId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: u8,
    cubelet_size: Float,
    cubelets: Vec<Cubelet>,
}
impl Lattice {
    /// Builds a solved lattice with `size` layers per axis and cubelets of
    /// edge length `cubelet_size`.
    pub fn new(size: u8, cubelet_size: Float) -> Result<Self, LatticeError> {
        if !(cubelet_size.is_finite() && cubelet_size > 0.0) {
            return Err(LatticeError::BadCubeletSize(cubelet_size));
        }
        let mut ret = Self {
            size: 0,
            cubelet_size,
            cubelets: vec![],
        };
        ret.rebuild(size)?;
        Ok(ret)
    }

    /// Discards all cubelets and builds a fresh solved lattice with `size`
    /// layers per axis.
    ///
    /// On error, the lattice is left unchanged.
    pub fn rebuild(&mut self, size: u8) -> Result<(), LatticeError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(LatticeError::SizeOutOfRange { size });
        }
        self.build(size);
        Ok(())
    }

    fn build(&mut self, size: u8) {
        self.size = size;
        self.cubelets = iproduct!(0..size, 0..size, 0..size)
            .map(|(x, y, z)| {
                let home = LatticeCoord([x, y, z]);
                Cubelet {
                    name: home.to_string(),
                    home,
                    coord: home,
                    transform: CubeletTransform {
                        position: self.coord_to_offset(home),
                        rotation: identity_rotation(),
                        scale: Vec3::new(1.0, 1.0, 1.0),
                    },
                    faces: FaceMask::for_home_coord(home.0, size),
                }
            })
            .collect();
        log::debug!("built {size}x{size}x{size} lattice");
    }

    /// Returns the number of layers per axis.
    pub fn size(&self) -> u8 {
        self.size
    }
    /// Returns the edge length of one cubelet.
    pub fn cubelet_size(&self) -> Float {
        self.cubelet_size
    }
    /// Returns the number of cubelets.
    pub fn len(&self) -> usize {
        self.cubelets.len()
    }
    /// Returns whether the lattice has no cubelets. This is never true for a
    /// successfully constructed lattice.
    pub fn is_empty(&self) -> bool {
        self.cubelets.is_empty()
    }
    /// Returns the distance from the center of the lattice to the center of
    /// an outermost layer.
    pub fn extent(&self) -> Float {
        (self.size as Float - 1.0) / 2.0 * self.cubelet_size
    }

    /// Returns an iterator over all cubelets.
    pub fn iter(&self) -> impl Iterator<Item = (CubeletId, &Cubelet)> {
        self.cubelets
            .iter()
            .enumerate()
            .map(|(i, c)| (CubeletId(i as u16), c))
    }
    /// Returns an iterator over all cubelet IDs.
    pub fn ids(&self) -> impl Iterator<Item = CubeletId> + use<> {
        (0..self.cubelets.len() as u16).map(CubeletId)
    }
    /// Returns the cubelet with the given ID.
    pub fn get(&self, id: CubeletId) -> Option<&Cubelet> {
        self.cubelets.get(id.0 as usize)
    }
    /// Returns the ID of the cubelet with the given name.
    pub fn find(&self, name: &str) -> Option<CubeletId> {
        self.iter().find(|(_, c)| c.name == name).map(|(id, _)| id)
    }

    /// Returns all cubelets whose current coordinate along `axis` is `value`,
    /// in arena order.
    pub fn cubelets_at_coordinate(&self, axis: Axis, value: u8) -> Vec<CubeletId> {
        self.iter()
            .filter(|(_, c)| c.coord[axis] == value)
            .map(|(id, _)| id)
            .collect()
    }
    /// Returns all cubelets whose home coordinate along `axis` is `value`, in
    /// arena order. These are the cubelets that started out in that slice,
    /// wherever they are now.
    pub fn cubelets_with_home_coordinate(&self, axis: Axis, value: u8) -> Vec<CubeletId> {
        self.iter()
            .filter(|(_, c)| c.home[axis] == value)
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the offset from the lattice center of layer `layer` along any
    /// axis.
    pub fn layer_to_offset(&self, layer: u8) -> Float {
        (layer as Float - (self.size as Float - 1.0) / 2.0) * self.cubelet_size
    }
    /// Returns the layer nearest to offset `x` from the lattice center,
    /// clamped to the lattice.
    pub fn offset_to_layer(&self, x: Float) -> u8 {
        let layer = (x / self.cubelet_size + (self.size as Float - 1.0) / 2.0).round();
        layer.clamp(0.0, self.size as Float - 1.0) as u8
    }
    /// Returns the center of the cubelet slot at `coord`.
    pub fn coord_to_offset(&self, coord: LatticeCoord) -> Vec3 {
        let [x, y, z] = coord.0.map(|c| self.layer_to_offset(c));
        Vec3::new(x, y, z)
    }
    /// Returns the coordinate of the slot nearest to `position`.
    pub fn offset_to_coord(&self, position: Vec3) -> LatticeCoord {
        LatticeCoord([position.x, position.y, position.z].map(|x| self.offset_to_layer(x)))
    }

    /// Overwrites the transform of a cubelet and recomputes its coordinate.
    ///
    /// Returns `false` if there is no such cubelet.
    pub fn set_transform(&mut self, id: CubeletId, transform: CubeletTransform) -> bool {
        let coord = self.offset_to_coord(transform.position);
        let Some(cubelet) = self.cubelets.get_mut(id.0 as usize) else {
            return false;
        };
        cubelet.transform = transform;
        cubelet.coord = coord;
        true
    }

    /// Snaps a cubelet onto the nearest lattice slot and the nearest
    /// axis-aligned orientation, then recomputes its coordinate.
    ///
    /// Re-homing an already re-homed cubelet changes nothing.
    pub fn rehome(&mut self, id: CubeletId) {
        let Some(cubelet) = self.get(id) else {
            log::warn!("cannot re-home nonexistent cubelet {id}");
            return;
        };
        let coord = self.offset_to_coord(cubelet.transform.position);
        let position = self.coord_to_offset(coord);
        let rotation = snap_rotation(cubelet.transform.rotation.normalize());
        if let Some(cubelet) = self.cubelets.get_mut(id.0 as usize) {
            cubelet.coord = coord;
            cubelet.transform.position = position;
            cubelet.transform.rotation = rotation;
        }
    }
}
impl Default for Lattice {
    /// Returns a solved lattice of the smallest supported size.
    fn default() -> Self {
        let mut ret = Self {
            size: 0,
            cubelet_size: DEFAULT_CUBELET_SIZE,
            cubelets: vec![],
        };
        ret.build(MIN_SIZE);
        ret
    }
}
impl Index<CubeletId> for Lattice {
    type Output = Cubelet;

    fn index(&self, id: CubeletId) -> &Cubelet {
        &self.cubelets[id.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use cubemath::assert_approx_eq;
    use cubemath::cgmath::Deg;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_build_lattice() {
        let lattice = Lattice::new(3, DEFAULT_CUBELET_SIZE).unwrap();
        assert_eq!(lattice.len(), 27);
        assert_approx_eq!(lattice.extent(), 8.0);

        let corner = &lattice[lattice.find("2,0,2").unwrap()];
        assert_eq!(corner.coord, LatticeCoord([2, 0, 2]));
        assert_approx_eq!(corner.transform.position, Vec3::new(8.0, -8.0, 8.0));
        assert_eq!(corner.faces, FaceMask::POS_X | FaceMask::NEG_Y | FaceMask::POS_Z);

        let core = &lattice[lattice.find("1,1,1").unwrap()];
        assert_eq!(core.faces, FaceMask::empty());
    }

    #[test]
    fn test_even_lattice_offsets() {
        let lattice = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
        assert_approx_eq!(lattice.layer_to_offset(0), -4.0);
        assert_approx_eq!(lattice.layer_to_offset(1), 4.0);
        assert_eq!(lattice.offset_to_layer(3.2), 1);
        assert_eq!(lattice.offset_to_layer(-100.0), 0);
    }

    #[test]
    fn test_bad_sizes() {
        assert_eq!(
            Lattice::new(1, 8.0),
            Err(LatticeError::SizeOutOfRange { size: 1 }),
        );
        assert_eq!(Lattice::new(3, 0.0), Err(LatticeError::BadCubeletSize(0.0)));

        let mut lattice = Lattice::new(4, 8.0).unwrap();
        assert!(lattice.rebuild(10).is_err());
        assert_eq!(lattice.size(), 4);
        assert_eq!(lattice.len(), 64);
    }

    #[test]
    fn test_rehome_is_idempotent() {
        let mut lattice = Lattice::new(3, 8.0).unwrap();
        let id = lattice.find("0,1,2").unwrap();
        let mut t = lattice[id].transform;
        t.position += Vec3::new(0.3, 7.6, -0.2);
        t.rotation = Quat::from_angle_y(Deg(88.0));
        lattice.set_transform(id, t);

        lattice.rehome(id);
        let once = lattice[id].clone();
        lattice.rehome(id);
        assert_eq!(lattice[id], once);
        assert_eq!(once.coord, LatticeCoord([0, 2, 2]));
        assert_approx_eq!(once.transform.position, Vec3::new(-8.0, 8.0, 8.0));
        assert_approx_eq!(once.transform.rotation, Quat::from_angle_y(Deg(90.0)));
    }

    #[test]
    fn test_home_coordinate_ignores_moves() {
        let mut lattice = Lattice::new(3, 8.0).unwrap();
        let id = lattice.find("2,0,1").unwrap();
        let mut t = lattice[id].transform;
        t.position = lattice.coord_to_offset(LatticeCoord([0, 0, 1]));
        lattice.set_transform(id, t);

        assert!(lattice.cubelets_at_coordinate(Axis::X, 0).contains(&id));
        assert!(!lattice.cubelets_at_coordinate(Axis::X, 2).contains(&id));
        assert!(lattice.cubelets_with_home_coordinate(Axis::X, 2).contains(&id));
        assert_eq!(lattice.cubelets_with_home_coordinate(Axis::X, 2).len(), 9);
    }

    proptest! {
        #[test]
        fn proptest_slices_partition_lattice(size in MIN_SIZE..=MAX_SIZE) {
            let lattice = Lattice::new(size, DEFAULT_CUBELET_SIZE).unwrap();
            let n2 = size as usize * size as usize;
            for axis in Axis::iter() {
                let mut seen = vec![false; lattice.len()];
                for layer in 0..size {
                    let slice = lattice.cubelets_at_coordinate(axis, layer);
                    prop_assert_eq!(slice.len(), n2);
                    for id in slice {
                        prop_assert!(!seen[id.0 as usize]);
                        seen[id.0 as usize] = true;
                    }
                }
                prop_assert!(seen.into_iter().all(|s| s));
            }
        }
    }
}
