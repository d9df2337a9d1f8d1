//! Persisted collections of saved items.
//!
//! A collection is the full, newest-first list of items for one content
//! kind, stored as a single JSON array under a fixed key. Every operation
//! reads or rewrites the whole array; collections stay small.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{ItemId, SavedItem};

use super::{KeyValueStore, StoreError};

/// Whole-collection access on top of a key-value port
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CollectionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Load a collection, newest first.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    pub fn load(&self, key: &str) -> Vec<SavedItem> {
        self.read(key).unwrap_or_else(|e| {
            warn!(key, error = %e, "Failed to read collection, treating as empty");
            Vec::new()
        })
    }

    /// Prepend an item and persist the collection
    pub fn append(&self, key: &str, item: SavedItem) -> Result<Vec<SavedItem>, StoreError> {
        let mut items = self.read(key)?;
        debug!(key, id = %item.id, "Appending item");
        items.insert(0, item);
        self.persist(key, &items)?;
        Ok(items)
    }

    /// Remove the item with `id` and persist; unknown ids are a no-op
    pub fn remove(&self, key: &str, id: &ItemId) -> Result<Vec<SavedItem>, StoreError> {
        let mut items = self.read(key)?;
        let before = items.len();
        items.retain(|item| &item.id != id);

        if items.len() != before {
            debug!(key, %id, "Removed item");
            self.persist(key, &items)?;
        }

        Ok(items)
    }

    /// Read for a rewrite: backend failures propagate so a transient read
    /// error never overwrites the stored collection. Malformed data still
    /// reads as empty.
    fn read(&self, key: &str) -> Result<Vec<SavedItem>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(key, error = %e, "Malformed collection data, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, key: &str, items: &[SavedItem]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items)?;
        self.backend.set(key, &json)
    }
}
