//! File-backed store.
//!
//! All keys live in a single JSON document kept in memory and rewritten on
//! every put (write to a temp file, then rename, so a crash never leaves a
//! half-written document). A missing or corrupt file reads as empty.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::LocalStore;
use crate::errors::Result;

pub struct FileStore {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens (or lazily creates) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = Self::load(&path);
        Self {
            path,
            cache: Mutex::new(cache),
        }
    }

    fn load(path: &Path) -> HashMap<String, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "local store unreadable, starting empty");
                HashMap::new()
            }
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.cache.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
