use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use anchor_lang::prelude::*;

use crate::state::HistoryRecord;

/// Key the draw history is stored under.
pub const HISTORY_KEY: &str = "luckylist_history";

/// Synchronous key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: Vec<u8>) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.bin", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> io::Result<()> {
        let path = self.path(key);
        let staging = path.with_extension("tmp");
        fs::write(&staging, value)?;
        fs::rename(staging, path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
            _ => Ok(()),
        }
    }
}

pub fn encode_history(history: &[HistoryRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = history.serialize(&mut bytes);
    bytes
}

/// Decodes a stored history. Anything that does not decode cleanly is
/// treated as an empty history.
pub fn decode_history(bytes: &[u8]) -> Vec<HistoryRecord> {
    match Vec::<HistoryRecord>::try_from_slice(bytes) {
        Ok(history) => history,
        Err(error) => {
            msg!("Discarding malformed draw history: {}", error);
            Vec::new()
        }
    }
}

pub fn load_history<S: KeyValueStore>(store: &S) -> Vec<HistoryRecord> {
    store
        .get(HISTORY_KEY)
        .map(|bytes| decode_history(&bytes))
        .unwrap_or_default()
}

pub fn save_history<S: KeyValueStore>(store: &mut S, history: &[HistoryRecord]) -> io::Result<()> {
    store.set(HISTORY_KEY, encode_history(history))
}

pub fn clear_history<S: KeyValueStore>(store: &mut S) -> io::Result<()> {
    store.remove(HISTORY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sequencer::tests::{person, prize, won};

    fn history() -> Vec<HistoryRecord> {
        let gold = prize(1, "Gold", 2);
        vec![
            won(&person(2, "B"), &gold, 1_700_000_000_123),
            won(&person(1, "A"), &gold, 1_700_000_000_001),
        ]
    }

    #[test]
    fn history_round_trips() {
        let mut store = MemoryStore::default();
        save_history(&mut store, &history()).unwrap();
        assert_eq!(load_history(&store), history());
    }

    #[test]
    fn absent_history_is_empty() {
        assert!(load_history(&MemoryStore::default()).is_empty());
    }

    #[test]
    fn malformed_history_is_empty() {
        let mut store = MemoryStore::default();
        store.set(HISTORY_KEY, b"not a history".to_vec()).unwrap();
        assert!(load_history(&store).is_empty());

        let mut truncated = encode_history(&history());
        truncated.pop();
        store.set(HISTORY_KEY, truncated).unwrap();
        assert!(load_history(&store).is_empty());

        let mut trailing = encode_history(&history());
        trailing.push(0);
        store.set(HISTORY_KEY, trailing).unwrap();
        assert!(load_history(&store).is_empty());
    }

    #[test]
    fn clearing_removes_the_key() {
        let mut store = MemoryStore::default();
        save_history(&mut store, &history()).unwrap();
        clear_history(&mut store).unwrap();
        assert_eq!(store.get(HISTORY_KEY), None);
    }

    #[test]
    fn file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            save_history(&mut store, &history()).unwrap();
        }
        let mut store = FileStore::open(dir.path()).unwrap();
        assert_eq!(load_history(&store), history());

        clear_history(&mut store).unwrap();
        clear_history(&mut store).unwrap();
        assert!(load_history(&store).is_empty());
    }
}
