//! Persistence of finished logs
//!
//! The engine only needs "write this JSON document under this key".
//! [`FileStore`] maps keys onto paths below a root directory and can prune
//! old game files; [`MemoryStore`] keeps documents in a map.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use super::recorder::EventLog;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid key {0}")]
    InvalidKey(String),
}

/// Key under which a finished game is written.
pub fn game_key(game_id: &str) -> String {
    format!("games/game_{game_id}.json")
}

pub trait GameStore {
    fn write(&mut self, key: &str, payload: &Value) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    /// Keep at most this many `games/game_*.json` files
    keep: Option<usize>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), keep: None }
    }

    pub fn with_retention(mut self, keep: usize) -> Self {
        self.keep = Some(keep);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let escapes = relative.is_absolute()
            || relative.components().any(|c| matches!(c, std::path::Component::ParentDir));
        if key.is_empty() || escapes {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Delete the oldest game files beyond the retention limit.
    fn prune(&self, keep: usize) -> Result<(), StoreError> {
        let dir = self.root.join("games");
        let io_err = |source| StoreError::Io { key: "games".to_string(), source };

        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_game = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("game_") && n.ends_with(".json"));
            if !is_game {
                continue;
            }
            let modified = fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((modified, path));
        }

        if files.len() <= keep {
            return Ok(());
        }
        files.sort();
        let excess = files.len() - keep;
        for (_, path) in files.into_iter().take(excess) {
            log::debug!("pruning old game file {}", path.display());
            fs::remove_file(&path).map_err(io_err)?;
        }
        Ok(())
    }
}

impl GameStore for FileStore {
    fn write(&mut self, key: &str, payload: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io { key: key.to_string(), source };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(payload)
            .map_err(|source| StoreError::Encode { key: key.to_string(), source })?;
        fs::write(&path, data).map_err(io_err)?;
        log::info!("saved {}", path.display());

        if let Some(keep) = self.keep {
            self.prune(keep)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.docs.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn write(&mut self, key: &str, payload: &Value) -> Result<(), StoreError> {
        self.docs.insert(key.to_string(), payload.clone());
        Ok(())
    }
}

/// Save a log as pretty JSON.
pub fn save_log_json<P: AsRef<Path>>(log: &EventLog, path: P) -> anyhow::Result<()> {
    let data = log.to_json()?;
    fs::write(path, data)?;
    Ok(())
}

/// Load a log written by [`save_log_json`] or a [`FileStore`].
pub fn load_log_json<P: AsRef<Path>>(path: P) -> anyhow::Result<EventLog> {
    let data = fs::read_to_string(path)?;
    Ok(EventLog::from_json(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_store_writes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.write(&game_key("abc"), &json!({"events": []})).unwrap();

        let path = dir.path().join("games").join("game_abc.json");
        let text = fs::read_to_string(path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["events"], json!([]));
    }

    #[test]
    fn test_file_store_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(matches!(
            store.write("../outside.json", &json!({})),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.write("", &json!({})), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_retention() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).with_retention(2);
        for id in ["a", "b", "c", "d"] {
            store.write(&game_key(id), &json!({ "id": id })).unwrap();
        }
        fs::write(dir.path().join("games").join("notes.txt"), "keep me").unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path().join("games"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["game_c.json", "game_d.json", "notes.txt"]);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.write("games/game_1.json", &json!({"x": 1})).unwrap();
        store.write("games/game_1.json", &json!({"x": 2})).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("games/game_1.json"), Some(&json!({"x": 2})));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["games/game_1.json"]);
    }
}
