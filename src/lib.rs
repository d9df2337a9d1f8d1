//! skoolify - AI study assistant
//!
//! Research questions, curated video collections, lesson notes, study
//! plans and interactive quizzes, generated by Gemini and kept in a local
//! store.
//!
//! # Architecture
//!
//! The core is written against two ports so it can be tested without a
//! network or a disk:
//! - `store::KeyValueStore`: one JSON document per key
//! - `adapters::ContentGenerator`: every generation call
//!
//! # Modules
//!
//! - `adapters`: Generative-AI backend (Gemini REST) and response parsing
//! - `config`: Layered configuration (env, YAML file, defaults)
//! - `domain`: Data structures (SavedItem, Payload, Quiz, Message)
//! - `library`: List/create/view lifecycle shared by the content sections
//! - `quiz`: Quiz-taking state machine
//! - `research`: Persisted research conversation
//! - `store`: Key-value backends and whole-collection access
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Ask a research question
//! skoolify research ask "How does photosynthesis work?"
//!
//! # Generate and save a lesson note
//! skoolify notes new --topic Photosynthesis --class "Grade 10"
//!
//! # Take a quiz
//! skoolify quiz new --topic Fractions --class "Grade 5" --level Beginner
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod quiz;
pub mod research;
pub mod store;

// Re-export main types at crate root for convenience
pub use adapters::{ContentGenerator, GeminiAdapter, ResearchAnswer};
pub use domain::{
    ContentKind, FormInput, ItemId, Message, Payload, QuizDefinition, QuizQuestion, QuizResult,
    Role, SavedItem, Source, VideoDescriptor,
};
pub use library::{Draft, LibraryController, LibraryError, ViewState};
pub use quiz::{Advance, AnswerOutcome, QuizError, QuizSession};
pub use research::ResearchChat;
pub use store::{CollectionStore, FileStore, KeyValueStore, MemoryStore, StoreError};
