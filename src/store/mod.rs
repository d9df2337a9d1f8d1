//! Local persistence for saved content.
//!
//! The core never touches the filesystem directly. It talks to a
//! `KeyValueStore` port holding one JSON document per key, which keeps the
//! library controller and research chat testable against `MemoryStore`.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.skoolify/store/
//! ├── .lock                          # Writer lock (fs2)
//! ├── skoolify_library_video.json    # Video collections, newest first
//! ├── skoolify_library_notes.json    # Lesson notes
//! ├── skoolify_library_study.json    # Study plans
//! ├── skoolify_library_quiz.json     # Quiz results
//! └── skoolify_research_chat.json    # Research conversation
//! ```

pub mod collection;
pub mod file;
pub mod memory;

use thiserror::Error;

pub use collection::CollectionStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a key-value backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Keyed string storage (the local-storage port)
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Drop the value stored under `key` (missing keys are fine)
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Keys become file names, so only a conservative alphabet is allowed
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
