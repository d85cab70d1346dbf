//! Persistence for cube puzzles: saved cubelet transforms, game info, and the
//! list of completed solves.
//!
//! Everything is stored as JSON strings in a [`KeyValueStore`] under the keys
//! listed in [`StorageKey`].

mod records;
mod store;

pub use records::*;
pub use store::*;
