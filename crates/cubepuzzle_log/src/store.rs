//! Key-value persistence of game state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cubepuzzle::Lattice;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{GameInfo, RankList, lattice_from_json, lattice_to_json};

/// Key under which a record is stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Transforms of all cubelets, or the empty string if there is no game
    /// in progress.
    CubeArr,
    /// [`GameInfo`].
    GameInfo,
    /// [`RankList`].
    Rank,
}
impl StorageKey {
    /// Returns the string key.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::CubeArr => "cubeArr",
            StorageKey::GameInfo => "gameInfo",
            StorageKey::Rank => "rank",
        }
    }
}
impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value storage that survives across sessions.
pub trait KeyValueStore: fmt::Debug + Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: String);
}

/// In-memory [`KeyValueStore`]. Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}
impl MemoryStore {
    /// Constructs an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_owned(), value);
    }
}

/// Typed access to the records of a [`KeyValueStore`].
///
/// Loading never fails: unreadable records are logged and treated as
/// missing.
#[derive(Debug)]
pub struct GameStore {
    store: Box<dyn KeyValueStore>,
}
impl GameStore {
    /// Wraps a key-value store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    fn get(&self, key: StorageKey) -> Option<String> {
        self.store.get(key.as_str()).filter(|s| !s.is_empty())
    }

    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let s = self.get(key)?;
        serde_json::from_str(&s)
            .map_err(|e| log::error!("error loading {key}: {e}"))
            .ok()
    }

    fn save(&self, key: StorageKey, value: &impl Serialize) {
        match serde_json::to_string(value) {
            Ok(s) => self.store.set(key.as_str(), s),
            Err(e) => log::error!("error saving {key}: {e}"),
        }
    }

    /// Loads game info, or returns `None` if there is none saved or it is
    /// unreadable.
    pub fn load_game_info(&self) -> Option<GameInfo> {
        self.load(StorageKey::GameInfo)
    }
    /// Saves game info.
    pub fn save_game_info(&self, info: &GameInfo) {
        self.save(StorageKey::GameInfo, info);
    }

    /// Loads the list of completed solves, or returns an empty list.
    pub fn load_rank(&self) -> RankList {
        self.load(StorageKey::Rank).unwrap_or_default()
    }
    /// Saves the list of completed solves.
    pub fn save_rank(&self, rank: &RankList) {
        self.save(StorageKey::Rank, rank);
    }

    /// Applies saved cubelet transforms to the lattice. Returns whether a
    /// saved game was restored.
    ///
    /// If the saved data does not fit the lattice, the lattice is left
    /// unchanged.
    pub fn load_cubelets(&self, lattice: &mut Lattice) -> bool {
        let Some(s) = self.get(StorageKey::CubeArr) else {
            return false;
        };
        match lattice_from_json(&s, lattice) {
            Ok(()) => true,
            Err(e) => {
                log::error!("error loading {}: {e}", StorageKey::CubeArr);
                false
            }
        }
    }
    /// Saves the transforms of all cubelets.
    pub fn save_cubelets(&self, lattice: &Lattice) {
        match lattice_to_json(lattice) {
            Ok(s) => self.store.set(StorageKey::CubeArr.as_str(), s),
            Err(e) => log::error!("error saving {}: {e}", StorageKey::CubeArr),
        }
    }
    /// Forgets the saved cubelet transforms.
    pub fn clear_cubelets(&self) {
        self.store.set(StorageKey::CubeArr.as_str(), String::new());
    }
}

#[cfg(test)]
mod tests {
    use cubemath::{Axis, QUARTER_TURN};
    use cubepuzzle::{DEFAULT_CUBELET_SIZE, RotationGroup};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::RankEntry;

    #[test]
    fn test_defaults_when_empty() {
        let games = GameStore::new(MemoryStore::new());
        assert_eq!(games.load_game_info(), None);
        assert_eq!(games.load_rank(), RankList::default());
        let mut lattice = Lattice::new(2, DEFAULT_CUBELET_SIZE).unwrap();
        assert!(!games.load_cubelets(&mut lattice));
    }

    #[test]
    fn test_defaults_when_corrupt() {
        let store = MemoryStore::new();
        store.set("gameInfo", "{not json".to_owned());
        store.set("rank", "{}".to_owned());
        let games = GameStore::new(store);
        assert_eq!(games.load_game_info(), None);
        assert_eq!(games.load_rank(), RankList::default());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let games = GameStore::new(store.clone());

        let info = GameInfo {
            game_time: 17.5,
            cube_size: 3,
        };
        games.save_game_info(&info);
        assert_eq!(games.load_game_info(), Some(info));
        assert_eq!(
            store.get("gameInfo").as_deref(),
            Some(r#"{"gameTime":17.5,"cubeSize":3}"#),
        );

        let mut rank = RankList::default();
        rank.insert(RankEntry {
            game_time: 61.0,
            time: 1,
            cube_size: 3,
        });
        games.save_rank(&rank);
        assert_eq!(games.load_rank(), rank);

        let mut lattice = Lattice::new(3, DEFAULT_CUBELET_SIZE).unwrap();
        let mut group = RotationGroup::new(&lattice, Axis::X.into(), 0);
        group.set_angle(QUARTER_TURN);
        group.dissolve(&mut lattice);
        games.save_cubelets(&lattice);

        let mut restored = Lattice::new(3, DEFAULT_CUBELET_SIZE).unwrap();
        assert!(games.load_cubelets(&mut restored));
        for (id, c) in lattice.iter() {
            assert_eq!(restored[id].coord, c.coord);
        }

        games.clear_cubelets();
        assert_eq!(store.get("cubeArr").as_deref(), Some(""));
        let mut fresh = Lattice::new(3, DEFAULT_CUBELET_SIZE).unwrap();
        assert!(!games.load_cubelets(&mut fresh));
    }
}
