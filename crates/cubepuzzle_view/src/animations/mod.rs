mod shuffle;
mod spin;

pub use shuffle::ShuffleAnimation;
pub use spin::SpinAnimation;
