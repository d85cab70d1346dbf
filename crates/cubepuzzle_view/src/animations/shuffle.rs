use std::collections::VecDeque;

use cubemath::QUARTER_TURN;
use cubepuzzle::{AngleAnimation, Lattice, RotationGroup, ShuffleStep};
use web_time::Duration;

/// Queue of shuffle turns, animated one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShuffleAnimation {
    queue: VecDeque<ShuffleStep>,
    current: Option<(RotationGroup, AngleAnimation)>,
    turn_duration: Duration,
}
impl ShuffleAnimation {
    /// Constructs an animation that applies `steps` in order, each taking
    /// `turn_duration`.
    pub fn new(steps: impl IntoIterator<Item = ShuffleStep>, turn_duration: Duration) -> Self {
        Self {
            queue: steps.into_iter().collect(),
            current: None,
            turn_duration,
        }
    }

    /// Returns the number of turns not yet finished.
    pub fn remaining(&self) -> usize {
        self.queue.len() + self.current.is_some() as usize
    }

    /// Returns the slice currently turning, if any.
    pub fn group(&self) -> Option<&RotationGroup> {
        self.current.as_ref().map(|(group, _)| group)
    }

    /// Steps the animation forward, starting the next turn if none is in
    /// progress and committing the current turn to `lattice` once it
    /// finishes. Returns whether every turn has finished.
    pub fn proceed(&mut self, lattice: &mut Lattice, delta: Duration) -> bool {
        if self.current.is_none() {
            let Some(step) = self.queue.pop_front() else {
                return true;
            };
            log::trace!("shuffle turn {} on layer {}", step.signed_axis(), step.layer);
            let group = RotationGroup::new(lattice, step.signed_axis(), step.layer);
            let anim = AngleAnimation::new(0.0, QUARTER_TURN, self.turn_duration);
            self.current = Some((group, anim));
        }

        if let Some((group, anim)) = &mut self.current {
            let done = anim.proceed(delta);
            group.set_angle(anim.angle());
            if done && let Some((group, _)) = self.current.take() {
                group.dissolve(lattice);
            }
        }

        self.remaining() == 0
    }
}
