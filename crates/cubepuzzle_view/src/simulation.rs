use std::f64::consts::TAU;

use cubemath::prelude::*;
use cubeprefs::Preferences;
use cubepuzzle::select::{exceeds_threshold, select_slice, select_whole_puzzle};
use cubepuzzle::{
    AngleAnimation, CubeletId, CubeletTransform, FaceFrame, FaceMask, Lattice, LatticeError,
    RotationGroup, generate_shuffle, is_solved,
};
use cubepuzzle_log::{GameInfo, GameStore, RankEntry, RankList};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use web_time::Duration;

use crate::animations::{ShuffleAnimation, SpinAnimation};
use crate::{DragPhase, GameState, PickedFace, PointerDown, PointerMove, WholeRotation};

/// Displayed state of one cubelet, relative to the puzzle root.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeletRenderData {
    /// Cubelet.
    pub id: CubeletId,
    /// Transform including any rotation in progress.
    pub transform: CubeletTransform,
    /// Sub-faces that carry a sticker.
    pub faces: FaceMask,
}

/// Rotation settling onto a quarter turn after the pointer is released.
#[derive(Debug, Clone, PartialEq)]
struct Correction {
    target: CorrectionTarget,
    anim: AngleAnimation,
}

#[derive(Debug, Clone, PartialEq)]
enum CorrectionTarget {
    Slice(RotationGroup),
    Whole(WholeRotation),
}

/// Game session for one cube puzzle, which manages the lattice, gestures,
/// animations, the solve timer, and saving.
///
/// The simulation never looks at a clock. The frontend calls
/// [`Self::step()`] once per frame with the time since the previous frame.
#[derive(Debug)]
pub struct PuzzleSimulation {
    prefs: Preferences,
    games: GameStore,

    /// Latest lattice, not including any rotation in progress.
    lattice: Lattice,
    /// Orientation of the whole puzzle in the world.
    root_rotation: Quat,

    state: GameState,
    game_info: GameInfo,
    rank: RankList,

    /// Pointer gesture in progress.
    drag: DragPhase,
    /// Snap animation after the pointer was released.
    correction: Option<Correction>,
    /// Shuffle turns in progress.
    shuffle: Option<ShuffleAnimation>,
    /// Decorative spin of the whole puzzle.
    spin: Option<SpinAnimation>,

    /// Time of the first tap of a potential double tap.
    last_tap: Option<Duration>,
    /// Width of the viewport, in the same units as pointer positions.
    viewport_width: Float,

    rng: ChaCha12Rng,
}
impl PuzzleSimulation {
    /// Constructs a simulation, restoring any saved game from `games`.
    pub fn new(prefs: Preferences, games: GameStore) -> Self {
        let default_size = prefs.puzzle.default_cube_size;
        let cubelet_size = prefs.puzzle.cubelet_size;

        let mut game_info = games.load_game_info().unwrap_or(GameInfo {
            game_time: 0.0,
            cube_size: default_size,
        });
        let mut lattice = match Lattice::new(game_info.cube_size, cubelet_size) {
            Ok(lattice) => lattice,
            Err(e) => {
                log::warn!("{e}; using cube size {default_size}");
                Lattice::new(default_size, cubelet_size).unwrap_or_else(|e| {
                    log::error!("{e}; using built-in lattice");
                    Lattice::default()
                })
            }
        };
        game_info.cube_size = lattice.size();

        if games.load_cubelets(&mut lattice) {
            log::debug!("restored saved game after {:.2}s", game_info.game_time);
        }
        let rank = games.load_rank();

        Self {
            prefs,
            games,

            lattice,
            root_rotation: identity_rotation(),

            state: GameState::Idle,
            game_info,
            rank,

            drag: DragPhase::Idle,
            correction: None,
            shuffle: None,
            spin: None,

            last_tap: None,
            viewport_width: 0.0,

            rng: ChaCha12Rng::from_rng(&mut rand::rng()),
        }
    }

    /// Returns the preferences in use.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }
    /// Returns the current stage of the session.
    pub fn state(&self) -> GameState {
        self.state
    }
    /// Returns the lattice, not including any rotation in progress.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }
    /// Returns the orientation of the whole puzzle in the world.
    pub fn root_rotation(&self) -> Quat {
        self.root_rotation
    }
    /// Returns the elapsed time and size of the current game.
    pub fn game_info(&self) -> &GameInfo {
        &self.game_info
    }
    /// Returns the list of completed solves.
    pub fn rank(&self) -> &RankList {
        &self.rank
    }
    /// Returns the pointer gesture in progress.
    pub fn drag_phase(&self) -> &DragPhase {
        &self.drag
    }
    /// Returns whether a released rotation is still settling. New gestures
    /// are ignored until it finishes.
    pub fn is_correcting(&self) -> bool {
        self.correction.is_some()
    }

    /// Sets the width of the viewport, which decides the axis of vertical
    /// drags off the puzzle.
    pub fn set_viewport_width(&mut self, width: Float) {
        self.viewport_width = width;
    }
    /// Reseeds the random number generator used for shuffles.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("game state {} -> {state}", self.state);
            self.state = state;
        }
    }

    /// Handles the pointer being pressed.
    pub fn pointer_down(&mut self, event: PointerDown) {
        match self.state {
            GameState::Idle => self.tap(event.time),
            GameState::Watching | GameState::Playing => {
                if self.is_correcting() {
                    log::trace!("ignoring gesture while a rotation settles");
                    return;
                }
                self.pointer_up();
                let pick = event.hit.zip(event.hit_point()).map(|(hit, point)| PickedFace {
                    cubelet: hit.cubelet,
                    frame: FaceFrame::from_hit(point),
                });
                self.drag = DragPhase::AwaitingThreshold {
                    start: event.screen,
                    pick,
                };
            }
            GameState::Shuffling | GameState::Solved => (),
        }
    }

    fn tap(&mut self, time: Duration) {
        let window = self.prefs.interaction.double_tap_window();
        let is_double_tap = self
            .last_tap
            .take()
            .and_then(|prev| time.checked_sub(prev))
            .is_some_and(|dt| dt < window);
        if !is_double_tap {
            self.last_tap = Some(time);
        } else if self.game_info.game_time > 0.0 {
            self.reorient();
        } else {
            self.start_shuffle();
        }
    }

    /// Handles the pointer moving while pressed.
    pub fn pointer_move(&mut self, event: PointerMove) {
        if !self.state.accepts_drags() || self.is_correcting() {
            return;
        }

        if let DragPhase::AwaitingThreshold { start, pick } = self.drag {
            self.commit_drag(start, pick, &event);
            return;
        }

        let radians_per_pixel = self.prefs.interaction.radians_per_pixel();
        match &mut self.drag {
            DragPhase::RotatingSlice {
                start,
                group,
                move_dir,
            } => {
                group.set_angle(move_dir.angle(event.screen - *start, radians_per_pixel));
            }
            DragPhase::RotatingWhole {
                start,
                rotation,
                move_dir,
                angle,
            } => {
                *angle = move_dir.angle(event.screen - *start, radians_per_pixel);
                self.root_rotation = rotation.at(*angle);
            }
            DragPhase::Idle | DragPhase::AwaitingThreshold { .. } | DragPhase::Dropped => (),
        }
    }

    /// Decides what a drag rotates once it has moved far enough.
    fn commit_drag(&mut self, start: Point2, pick: Option<PickedFace>, event: &PointerMove) {
        if pick.is_some() && self.state == GameState::Watching {
            self.set_state(GameState::Playing);
        }
        let prefs = &self.prefs.interaction;

        let delta = event.screen - start;
        if !exceeds_threshold(delta, prefs.drag_threshold) {
            return;
        }
        let radians_per_pixel = prefs.radians_per_pixel();

        let Some(pick) = pick else {
            let selection = select_whole_puzzle(
                delta,
                event.screen,
                self.viewport_width,
                prefs.drag_threshold,
                prefs.whole_puzzle_vertical_slack,
            );
            log::trace!("rotating whole puzzle about {}", selection.axis);
            let rotation = WholeRotation::new(self.root_rotation, selection.axis.unit_vec3());
            let angle = selection.move_dir.angle(delta, radians_per_pixel);
            self.root_rotation = rotation.at(angle);
            self.drag = DragPhase::RotatingWhole {
                start,
                rotation,
                move_dir: selection.move_dir,
                angle,
            };
            return;
        };

        let Some(displacement) = pick.frame.drag_displacement(&event.ray) else {
            log::trace!("pointer ray is parallel to the picked face");
            return;
        };
        match select_slice(
            &self.lattice,
            pick.cubelet,
            &pick.frame,
            displacement,
            delta,
            self.root_rotation,
        ) {
            Ok(selection) => {
                log::trace!(
                    "rotating layer {} about {}",
                    selection.layer,
                    selection.axis,
                );
                let mut group = RotationGroup::new(&self.lattice, selection.axis, selection.layer);
                group.set_angle(selection.move_dir.angle(delta, radians_per_pixel));
                self.drag = DragPhase::RotatingSlice {
                    start,
                    group,
                    move_dir: selection.move_dir,
                };
            }
            Err(e) => {
                log::warn!("ignoring drag: {e}");
                self.drag = DragPhase::Dropped;
            }
        }
    }

    /// Handles the pointer being released. Any rotation in progress settles
    /// onto the nearest quarter turn.
    pub fn pointer_up(&mut self) {
        let per_quarter_turn = self.prefs.animation.snap_per_quarter_turn();
        self.correction = match std::mem::take(&mut self.drag) {
            DragPhase::RotatingSlice { group, .. } => Some(Correction {
                anim: AngleAnimation::snap(group.angle(), per_quarter_turn),
                target: CorrectionTarget::Slice(group),
            }),
            DragPhase::RotatingWhole {
                rotation, angle, ..
            } => Some(Correction {
                anim: AngleAnimation::snap(angle, per_quarter_turn),
                target: CorrectionTarget::Whole(rotation),
            }),
            DragPhase::Idle | DragPhase::AwaitingThreshold { .. } | DragPhase::Dropped => {
                return;
            }
        };
    }

    /// Advances the timer and all animations by `delta`. Returns whether the
    /// frame needs to be redrawn.
    pub fn step(&mut self, delta: Duration) -> bool {
        let mut needs_redraw = self.state == GameState::Playing || self.drag != DragPhase::Idle;

        if self.state == GameState::Playing {
            self.game_info.game_time += delta.as_secs_f64();
        }

        if let Some(spin) = &mut self.spin {
            needs_redraw = true;
            let done = spin.proceed(delta);
            self.root_rotation = spin.rotation();
            if done {
                self.spin = None;
            }
        }

        if let Some(correction) = &mut self.correction {
            needs_redraw = true;
            let done = correction.anim.proceed(delta);
            let angle = correction.anim.angle();
            match &mut correction.target {
                CorrectionTarget::Slice(group) => group.set_angle(angle),
                CorrectionTarget::Whole(rotation) => self.root_rotation = rotation.at(angle),
            }
            if done && let Some(correction) = self.correction.take() {
                match correction.target {
                    CorrectionTarget::Slice(group) => self.finish_slice_rotation(group),
                    CorrectionTarget::Whole(rotation) => {
                        self.root_rotation = snap_rotation(rotation.at(angle));
                    }
                }
            }
        }

        if let Some(shuffle) = &mut self.shuffle {
            needs_redraw = true;
            if shuffle.proceed(&mut self.lattice, delta) {
                self.shuffle = None;
            }
        }

        if self.state == GameState::Shuffling && self.shuffle.is_none() && self.spin.is_none() {
            self.set_state(GameState::Watching);
        }

        needs_redraw
    }

    fn finish_slice_rotation(&mut self, group: RotationGroup) {
        group.dissolve(&mut self.lattice);
        if is_solved(&self.lattice) {
            self.on_solved();
        } else {
            self.games.save_cubelets(&self.lattice);
            self.games.save_game_info(&self.game_info);
        }
    }

    fn on_solved(&mut self) {
        let size = self.lattice.size();
        log::info!(
            "solved {size}x{size}x{size} cube in {:.2}s",
            self.game_info.game_time,
        );
        self.rank.insert(RankEntry::now(self.game_info.game_time, size));
        self.games.save_rank(&self.rank);

        self.game_info.game_time = 0.0;
        self.games.clear_cubelets();
        self.games.save_game_info(&self.game_info);
        self.set_state(GameState::Solved);
    }

    /// Acknowledges a solve and returns to [`GameState::Idle`].
    pub fn dismiss_solved(&mut self) {
        if self.state == GameState::Solved {
            self.set_state(GameState::Idle);
        }
    }

    /// Starts a new game on a fresh lattice with `size` layers per axis,
    /// discarding the current game. Returns `Ok(false)` without changing
    /// anything while a shuffle is in progress.
    pub fn set_cube_size(&mut self, size: u8) -> Result<bool, LatticeError> {
        if self.state == GameState::Shuffling {
            log::debug!("ignoring cube size change while shuffling");
            return Ok(false);
        }
        self.lattice.rebuild(size)?;

        self.game_info = GameInfo {
            game_time: 0.0,
            cube_size: size,
        };
        self.games.save_game_info(&self.game_info);
        self.games.clear_cubelets();

        self.root_rotation = identity_rotation();
        self.drag = DragPhase::Idle;
        self.correction = None;
        self.shuffle = None;
        self.spin = None;
        self.last_tap = None;
        self.set_state(GameState::Idle);
        Ok(true)
    }

    /// Shuffles the puzzle and resets the timer. The puzzle spins while the
    /// shuffle runs, and the session enters [`GameState::Watching`] once it
    /// finishes.
    ///
    /// Returns `false` without changing anything if the puzzle is already
    /// shuffling or a rotation is in progress.
    pub fn start_shuffle(&mut self) -> bool {
        if self.state == GameState::Shuffling
            || self.drag != DragPhase::Idle
            || self.is_correcting()
        {
            return false;
        }

        let size = self.lattice.size();
        let steps = generate_shuffle(size, &mut self.rng);
        log::debug!("shuffling {size}x{size}x{size} cube with {} turns", steps.len());

        let turn_duration = self.prefs.animation.shuffle_turn_duration();
        let spin_duration = turn_duration * steps.len() as u32;
        let spin_angle = TAU * (size as Float + 1.0);

        self.game_info.game_time = 0.0;
        self.shuffle = Some(ShuffleAnimation::new(steps, turn_duration));
        self.spin = Some(SpinAnimation::new(self.root_rotation, spin_angle, spin_duration));
        self.set_state(GameState::Shuffling);
        true
    }

    /// Spins the puzzle once around so the player can look at it before
    /// resuming a saved game, then enters [`GameState::Watching`].
    pub fn reorient(&mut self) {
        let duration = self.prefs.animation.reorient_duration();
        self.spin = Some(SpinAnimation::new(self.root_rotation, -TAU, duration));
        self.set_state(GameState::Shuffling);
    }

    /// Returns the displayed transform of every cubelet, relative to the
    /// puzzle root, including any slice rotation in progress.
    pub fn render_data(&self) -> Vec<CubeletRenderData> {
        let group = self.active_group();
        self.lattice
            .iter()
            .map(|(id, cubelet)| CubeletRenderData {
                id,
                transform: match group {
                    Some(g) if g.contains(id) => g.apply(cubelet.transform),
                    _ => cubelet.transform,
                },
                faces: cubelet.faces,
            })
            .collect()
    }

    fn active_group(&self) -> Option<&RotationGroup> {
        self.drag
            .group()
            .or_else(|| match &self.correction {
                Some(Correction {
                    target: CorrectionTarget::Slice(group),
                    ..
                }) => Some(group),
                _ => None,
            })
            .or_else(|| self.shuffle.as_ref()?.group())
    }
}
