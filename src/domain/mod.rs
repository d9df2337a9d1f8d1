//! Domain types for skoolify.
//!
//! This module contains the core data structures:
//! - SavedItem: A persisted library entry with a kind-tagged payload
//! - Video, quiz and chat value types
//! - FormInput: What the user typed into a create form

pub mod form;
pub mod item;
pub mod message;
pub mod quiz;
pub mod video;

// Re-export commonly used types
pub use form::{FormInput, DEFAULT_LEVEL};
pub use item::{ContentKind, ItemId, Payload, SavedItem};
pub use message::{Message, Role, Source};
pub use quiz::{QuizDefinition, QuizQuestion, QuizResult};
pub use video::VideoDescriptor;
