//! Quiz-taking state machine.
//!
//! ```text
//! question ──answer──▶ answered ──advance──▶ next question
//!                                  │
//!                                  └─(last)─▶ finished ─▶ QuizResult
//! ```
//!
//! The first answer to a question is final. Correctness is recorded when the
//! question is answered and folded into the score when the learner advances,
//! including for the last question, so the score is computed in one place.

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::domain::{QuizDefinition, QuizQuestion, QuizResult};

/// Errors from driving a quiz session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    Empty,

    #[error("Question {index} has not been answered yet")]
    NotAnswered { index: usize },

    #[error("Quiz is already finished")]
    Finished,
}

/// Outcome of answering the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer was recorded
    Recorded { correct: bool },

    /// The question already had an answer; nothing changed
    AlreadyAnswered,
}

/// Outcome of advancing past an answered question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index
    Next(usize),

    /// The last question was answered; here is the final result
    Finished(QuizResult),
}

/// The selection made for the current question
#[derive(Debug, Clone)]
struct Selection {
    option: String,
    correct: bool,
}

/// A learner working through one quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: QuizDefinition,
    current_index: usize,
    selected: Option<Selection>,
    running_score: u32,
    finished: bool,
}

impl QuizSession {
    /// Start a session at the first question
    pub fn new(quiz: QuizDefinition) -> Result<Self, QuizError> {
        if quiz.is_empty() {
            return Err(QuizError::Empty);
        }

        Ok(Self {
            quiz,
            current_index: 0,
            selected: None,
            running_score: 0,
            finished: false,
        })
    }

    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    /// 0-based index of the question being shown
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.current_index]
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.quiz.len()
    }

    /// The option chosen for the current question, if any
    pub fn selected_option(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.option.as_str())
    }

    /// Correct answers among the questions already advanced past
    pub fn running_score(&self) -> u32 {
        self.running_score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Answer the current question. Only the first answer counts.
    pub fn answer(&mut self, option: &str) -> Result<AnswerOutcome, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }

        if self.selected.is_some() {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        let correct = self.current_question().is_correct(option);
        debug!(index = self.current_index, correct, "Question answered");

        self.selected = Some(Selection {
            option: option.to_string(),
            correct,
        });

        Ok(AnswerOutcome::Recorded { correct })
    }

    /// Move past the answered question, finishing after the last one
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }

        let selection = self.selected.take().ok_or(QuizError::NotAnswered {
            index: self.current_index,
        })?;

        if selection.correct {
            self.running_score += 1;
        }

        if !self.is_last_question() {
            self.current_index += 1;
            return Ok(Advance::Next(self.current_index));
        }

        self.finished = true;
        let result = QuizResult {
            quiz: self.quiz.clone(),
            score: self.running_score,
            total_questions: self.quiz.len() as u32,
            completed_at: Utc::now(),
        };
        debug!(
            score = result.score,
            total = result.total_questions,
            "Quiz finished"
        );

        Ok(Advance::Finished(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(n: usize) -> QuizDefinition {
        let questions = (0..n)
            .map(|i| QuizQuestion {
                prompt: format!("Question {}", i + 1),
                options: vec!["A".to_string(), "B".to_string()],
                correct_option: "A".to_string(),
                explanation: String::new(),
            })
            .collect();
        QuizDefinition::new("Letters", questions)
    }

    #[test]
    fn test_empty_quiz_rejected() {
        assert_eq!(
            QuizSession::new(QuizDefinition::new("Nothing", vec![])).unwrap_err(),
            QuizError::Empty
        );
    }

    #[test]
    fn test_single_question_quiz() {
        let mut session = QuizSession::new(quiz(1)).unwrap();
        assert!(session.is_last_question());

        session.answer("A").unwrap();
        match session.advance().unwrap() {
            Advance::Finished(result) => {
                assert_eq!(result.score, 1);
                assert_eq!(result.total_questions, 1);
            }
            other => panic!("Expected finish, got {:?}", other),
        }
    }

    #[test]
    fn test_selection_cleared_on_next() {
        let mut session = QuizSession::new(quiz(2)).unwrap();
        session.answer("B").unwrap();
        assert_eq!(session.selected_option(), Some("B"));

        assert_eq!(session.advance().unwrap(), Advance::Next(1));
        assert_eq!(session.selected_option(), None);
        assert_eq!(session.running_score(), 0);
    }
}
