//! Library lifecycle controller.
//!
//! ```text
//!            begin_create            save
//!   List ──────────────────▶ Create ──────▶ View
//!    ▲  ◀──────────────────    │             │
//!    │        cancel           │             │
//!    │                         ▼             │
//!    └────────── open / back / delete ───────┘
//! ```
//!
//! There is no direct Create -> View without a successful save and no way
//! to edit an item in place. Deletes always go through the confirmation
//! port before the store is touched.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{ContentKind, FormInput, ItemId, Payload, SavedItem};
use crate::store::{CollectionStore, StoreError};

use super::confirm::Confirmation;

const DELETE_PROMPT: &str = "Delete this saved item?";

/// Errors from library operations
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Cannot {action} while in {from} state")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("A {actual} payload cannot be saved in the {expected} library")]
    KindMismatch {
        expected: ContentKind,
        actual: ContentKind,
    },

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Id prefix {0:?} matches more than one item")]
    Ambiguous(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// The single view the controller is showing
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Browsing saved items
    List,

    /// Running the kind-specific create workflow
    Create,

    /// Showing one item
    View(SavedItem),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::List => "list",
            ViewState::Create => "create",
            ViewState::View(_) => "view",
        }
    }
}

/// Create/list/view/delete lifecycle for one content kind
pub struct LibraryController {
    kind: ContentKind,
    collections: CollectionStore,
    confirmation: Arc<dyn Confirmation>,
    items: Vec<SavedItem>,
    state: ViewState,
}

impl LibraryController {
    /// Load the collection for `kind` and start in the list view
    pub fn new(
        kind: ContentKind,
        collections: CollectionStore,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        let items = collections.load(kind.storage_key());
        debug!(%kind, count = items.len(), "Library loaded");

        Self {
            kind,
            collections,
            confirmation,
            items,
            state: ViewState::List,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Saved items, newest first
    pub fn items(&self) -> &[SavedItem] {
        &self.items
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The item being viewed, if any
    pub fn active_item(&self) -> Option<&SavedItem> {
        match &self.state {
            ViewState::View(item) => Some(item),
            _ => None,
        }
    }

    /// Find an item by full id or unique id prefix
    pub fn find(&self, id_prefix: &str) -> Result<&SavedItem, LibraryError> {
        let prefix = id_prefix.trim().to_lowercase();
        let mut matches = self
            .items
            .iter()
            .filter(|item| item.id.to_string().starts_with(&prefix));

        let first = matches
            .next()
            .ok_or_else(|| LibraryError::NotFound(id_prefix.to_string()))?;

        if prefix.is_empty() || matches.next().is_some() {
            return Err(LibraryError::Ambiguous(id_prefix.to_string()));
        }

        Ok(first)
    }

    /// List -> Create
    pub fn begin_create(&mut self) -> Result<(), LibraryError> {
        self.expect_state(matches!(self.state, ViewState::List), "create an item")?;
        self.state = ViewState::Create;
        Ok(())
    }

    /// Create -> List, leaving the collection untouched
    pub fn cancel(&mut self) -> Result<(), LibraryError> {
        self.expect_state(matches!(self.state, ViewState::Create), "cancel")?;
        self.state = ViewState::List;
        Ok(())
    }

    /// Persist the payload produced by the create workflow and view it
    pub fn save(&mut self, payload: Payload, input: &FormInput) -> Result<SavedItem, LibraryError> {
        self.expect_state(matches!(self.state, ViewState::Create), "save")?;

        if payload.kind() != self.kind {
            return Err(LibraryError::KindMismatch {
                expected: self.kind,
                actual: payload.kind(),
            });
        }

        let item = SavedItem::new(payload, input);
        self.items = self
            .collections
            .append(self.kind.storage_key(), item.clone())?;
        info!(kind = %self.kind, id = %item.id, topic = %item.topic, "Item saved");

        self.state = ViewState::View(item.clone());
        Ok(item)
    }

    /// List -> View on an existing item
    pub fn open(&mut self, id: &ItemId) -> Result<&SavedItem, LibraryError> {
        self.expect_state(matches!(self.state, ViewState::List), "open an item")?;

        let item = self
            .items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))?;

        self.state = ViewState::View(item);
        self.active_item()
            .ok_or_else(|| LibraryError::NotFound(id.to_string()))
    }

    /// View -> List, clearing the active item
    pub fn back(&mut self) -> Result<(), LibraryError> {
        self.expect_state(matches!(self.state, ViewState::View(_)), "go back")?;
        self.state = ViewState::List;
        Ok(())
    }

    /// Delete the item being viewed after confirmation.
    ///
    /// Returns false (and stays in View) when the user declines.
    pub fn delete_active(&mut self) -> Result<bool, LibraryError> {
        let id = match &self.state {
            ViewState::View(item) => item.id,
            other => {
                return Err(LibraryError::InvalidTransition {
                    from: other.name(),
                    action: "delete the active item",
                })
            }
        };

        if !self.confirmation.confirm(DELETE_PROMPT) {
            debug!(%id, "Delete declined");
            return Ok(false);
        }

        self.remove(&id)?;
        self.state = ViewState::List;
        Ok(true)
    }

    /// Delete an item from the list view after confirmation
    pub fn delete(&mut self, id: &ItemId) -> Result<bool, LibraryError> {
        self.expect_state(matches!(self.state, ViewState::List), "delete an item")?;

        if !self.items.iter().any(|item| &item.id == id) {
            return Err(LibraryError::NotFound(id.to_string()));
        }

        if !self.confirmation.confirm(DELETE_PROMPT) {
            debug!(%id, "Delete declined");
            return Ok(false);
        }

        self.remove(id)?;
        Ok(true)
    }

    fn remove(&mut self, id: &ItemId) -> Result<(), LibraryError> {
        self.items = self.collections.remove(self.kind.storage_key(), id)?;
        info!(kind = %self.kind, %id, "Item deleted");
        Ok(())
    }

    fn expect_state(&self, allowed: bool, action: &'static str) -> Result<(), LibraryError> {
        if allowed {
            Ok(())
        } else {
            Err(LibraryError::InvalidTransition {
                from: self.state.name(),
                action,
            })
        }
    }
}
