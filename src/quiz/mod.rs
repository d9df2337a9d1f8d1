//! Interactive quiz taking.
//!
//! A `QuizSession` walks a learner through a generated quiz one question at
//! a time and produces the `QuizResult` that the quiz library saves.

pub mod session;

pub use session::{Advance, AnswerOutcome, QuizError, QuizSession};
