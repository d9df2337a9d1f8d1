//! Adapter interfaces for the generative-AI backend.
//!
//! Every piece of generated content comes through the `ContentGenerator`
//! trait. The Gemini REST adapter is the production implementation; tests
//! provide scripted generators.

pub mod extract;
pub mod gemini;
pub mod prompts;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{QuizDefinition, Source, VideoDescriptor};

// Re-export the Gemini adapter
pub use gemini::GeminiAdapter;

/// Answer to a research question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchAnswer {
    /// The answer body (markdown)
    pub text: String,

    /// Web sources the answer was grounded on
    pub sources: Vec<Source>,
}

impl ResearchAnswer {
    /// Create an answer without sources
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// Trait for generative-AI backends
///
/// Failure is the only error signal: there are no partial results.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Answer a free-form research question with grounding sources
    async fn research_query(&self, text: &str) -> Result<ResearchAnswer>;

    /// Find video lessons for a topic
    async fn find_videos(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<Vec<VideoDescriptor>>;

    /// Write a lesson note (markdown)
    async fn generate_notes(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<String>;

    /// Write a study plan (markdown)
    async fn generate_study_plan(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<String>;

    /// Generate a multiple-choice quiz
    async fn generate_quiz(
        &self,
        topic: &str,
        class_name: &str,
        level: &str,
        instructions: &str,
    ) -> Result<QuizDefinition>;

    /// Check that the backend is reachable and credentials work
    async fn health_check(&self) -> Result<()>;
}
