//! File-backed key-value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temp file that is
//! renamed over the target while an exclusive lock is held on `<dir>/.lock`,
//! so a crash mid-write never leaves a truncated document behind.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use fs2::FileExt;
use tracing::debug;

use super::{validate_key, KeyValueStore, StoreError};

/// Directory of JSON documents, one per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store in the configured location (~/.skoolify/store)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::store_dir()?))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Take the writer lock; released when the returned handle is dropped
    fn lock(&self) -> Result<File, StoreError> {
        fs::create_dir_all(&self.dir)?;
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(".lock"))?;
        lock.lock_exclusive()?;
        Ok(lock)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let _lock = self.lock()?;

        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, &path)?;

        debug!(key, bytes = value.len(), "Stored document");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(());
        }

        let _lock = self.lock()?;
        fs::remove_file(&path)?;
        Ok(())
    }
}
