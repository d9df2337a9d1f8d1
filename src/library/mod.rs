//! Saved-content libraries.
//!
//! Videos, lesson notes, study plans and quiz results all share one
//! lifecycle: browse the saved items, create a new one through a
//! kind-specific workflow, view it, delete it. The lifecycle lives in
//! `LibraryController`; what differs per kind lives in `workflow`.

pub mod confirm;
pub mod controller;
pub mod workflow;

pub use confirm::{AutoConfirm, Confirmation, StdinConfirmation};
pub use controller::{LibraryController, LibraryError, ViewState};
pub use workflow::Draft;
