//! Quiz definitions and results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    pub prompt: String,

    #[serde(default)]
    pub options: Vec<String>,

    /// Text of the correct option
    #[serde(rename = "correctAnswer")]
    pub correct_option: String,

    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// Exact, case- and whitespace-sensitive comparison with the correct option
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_option
    }

    /// Whether the correct option appears exactly once among the options
    pub fn has_valid_answer(&self) -> bool {
        self.options
            .iter()
            .filter(|o| **o == self.correct_option)
            .count()
            == 1
    }
}

/// A generated quiz, before anyone has taken it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub topic: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl QuizDefinition {
    pub fn new(topic: impl Into<String>, questions: Vec<QuizQuestion>) -> Self {
        Self {
            topic: topic.into(),
            questions,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A finished quiz with its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(flatten)]
    pub quiz: QuizDefinition,

    /// Number of questions answered correctly
    pub score: u32,

    pub total_questions: u32,

    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Score as a rounded percentage of the question count
    pub fn percentage(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        ((self.score as f64 / self.total_questions as f64) * 100.0).round() as u32
    }
}
