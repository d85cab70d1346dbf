use strum::Display;

/// Stage of a game session.
///
/// ```text
/// Idle ──double tap──▶ Shuffling ──done──▶ Watching ──first slice drag──▶ Playing
///  ▲                                                                        │
///  └───────────── dismissed ◀── Solved ◀──────── solved after a turn ◀──────┘
/// ```
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Waiting for a double tap to start.
    #[default]
    Idle,
    /// Shuffle or re-orientation animation in progress; input is ignored.
    Shuffling,
    /// Puzzle is ready but the timer has not started.
    Watching,
    /// Timer is running.
    Playing,
    /// Puzzle was just solved.
    Solved,
}
impl GameState {
    /// Returns whether pointer gestures rotate the puzzle.
    pub fn accepts_drags(self) -> bool {
        matches!(self, GameState::Watching | GameState::Playing)
    }
}
