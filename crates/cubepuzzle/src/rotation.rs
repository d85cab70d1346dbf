//! Slice rotations: rotation groups, drag angles, and snapping animations.

use cubemath::cgmath::Rad;
use cubemath::prelude::*;
use smallvec::SmallVec;
use web_time::Duration;

use crate::{CubeletId, CubeletTransform, Lattice};

/// Temporary grouping of the cubelets of one slice under a pivot at the
/// lattice center.
///
/// While the group exists, the transforms stored in the [`Lattice`] are
/// unchanged; the pivot rotation is applied when reading them through
/// [`RotationGroup::apply()`]. Dissolving the group bakes the pivot rotation
/// into each member and re-homes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationGroup {
    axis: SignedAxis,
    layer: u8,
    members: SmallVec<[CubeletId; 16]>,
    /// Current rotation of the pivot about `axis`, in radians.
    angle: Float,
}
impl RotationGroup {
    /// Groups every cubelet whose current coordinate along `axis` is `layer`.
    pub fn new(lattice: &Lattice, axis: SignedAxis, layer: u8) -> Self {
        Self {
            axis,
            layer,
            members: lattice
                .cubelets_at_coordinate(axis.axis, layer)
                .into_iter()
                .collect(),
            angle: 0.0,
        }
    }

    /// Returns the rotation axis.
    pub fn axis(&self) -> SignedAxis {
        self.axis
    }
    /// Returns the layer that was grouped.
    pub fn layer(&self) -> u8 {
        self.layer
    }
    /// Returns the members of the group.
    pub fn members(&self) -> &[CubeletId] {
        &self.members
    }
    /// Returns whether `id` is a member of the group.
    pub fn contains(&self, id: CubeletId) -> bool {
        self.members.contains(&id)
    }
    /// Returns the current angle of the pivot, in radians.
    pub fn angle(&self) -> Float {
        self.angle
    }
    /// Sets the angle of the pivot, in radians.
    ///
    /// The pivot orientation is recomputed from the angle alone, so repeated
    /// calls never accumulate error.
    pub fn set_angle(&mut self, angle: Float) {
        self.angle = angle;
    }

    /// Returns the current orientation of the pivot.
    pub fn pivot_rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis.vector(), Rad(self.angle))
    }

    /// Returns the displayed transform of a member cubelet whose stored
    /// transform is `t`.
    pub fn apply(&self, t: CubeletTransform) -> CubeletTransform {
        let rot = self.pivot_rotation();
        CubeletTransform {
            position: rot * t.position,
            rotation: rot * t.rotation,
            scale: t.scale,
        }
    }

    /// Bakes the pivot rotation into every member and re-homes it onto the
    /// lattice, consuming the group.
    pub fn dissolve(self, lattice: &mut Lattice) {
        log::trace!(
            "dissolving {} cubelets on layer {} about {} at {:.4} rad",
            self.members.len(),
            self.layer,
            self.axis,
            self.angle,
        );
        for &id in &self.members {
            let Some(cubelet) = lattice.get(id) else {
                continue;
            };
            let t = self.apply(cubelet.transform);
            lattice.set_transform(id, t);
            lattice.rehome(id);
        }
    }
}

/// Linear interpolation of an angle toward a target over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleAnimation {
    from: Float,
    to: Float,
    duration: Duration,
    elapsed: Duration,
}
impl AngleAnimation {
    /// Constructs an animation from `from` to `to` radians.
    pub fn new(from: Float, to: Float, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Constructs an animation that settles `current` onto the nearest
    /// quarter turn, taking `per_quarter_turn` for each quarter turn of
    /// distance.
    pub fn snap(current: Float, per_quarter_turn: Duration) -> Self {
        let to = snap_to_quarter_turn(current);
        let duration = per_quarter_turn.mul_f64((current - to).abs() / QUARTER_TURN);
        log::trace!("snapping {current:.4} rad to {to:.4} rad over {duration:?}");
        Self::new(current, to, duration)
    }

    /// Steps the animation forward. Returns whether the animation has
    /// finished.
    pub fn proceed(&mut self, delta: Duration) -> bool {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.is_done()
    }

    /// Returns whether the animation has reached its target.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Returns the current angle, in radians.
    pub fn angle(&self) -> Float {
        if self.is_done() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    /// Returns the final angle, in radians.
    pub fn target(&self) -> Float {
        self.to
    }
}
