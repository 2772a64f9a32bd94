use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// A string key-value store with the shape of browser local storage.
///
/// All methods are infallible by contract: an unreadable or unwritable
/// backing store degrades to empty reads and dropped writes, it never
/// surfaces an error to navigation code.
pub trait KvStore {
    /// The stored value for `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    /// Set `key` to `value`, overwriting any prior value
    fn set(&mut self, key: &str, value: String);
    /// Remove `key`; no-op if absent
    fn remove(&mut self, key: &str);
}

/// In-memory store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    values: IndexMap<String, String>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.shift_remove(key);
    }
}

/// File-backed store (written to .state.json).
///
/// The whole map is loaded on open and rewritten after every mutation.
/// Writes go through a temp file in the same directory so a crash never
/// leaves a half-written state file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: IndexMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or malformed file starts empty.
    pub fn open(path: &Path) -> FileStore {
        let values = fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();
        FileStore {
            path: path.to_path_buf(),
            values,
        }
    }

    fn flush(&self) {
        // Best effort: storage trouble degrades to a dropped write
        let Ok(content) = serde_json::to_string_pretty(&self.values) else {
            return;
        };
        let Some(dir) = self.path.parent() else {
            return;
        };
        let Ok(mut tmp) = tempfile::NamedTempFile::new_in(dir) else {
            return;
        };
        if tmp.write_all(content.as_bytes()).is_ok() {
            let _ = tmp.persist(&self.path);
        }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.values.shift_remove(key).is_some() {
            self.flush();
        }
    }
}
