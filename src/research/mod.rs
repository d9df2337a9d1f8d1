//! Research chat.
//!
//! A single persisted conversation with the research assistant. Every
//! exchange is written back to the store twice: once when the question is
//! asked and once when the answer (or the apology) arrives, so a crash
//! between the two never loses the question.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::adapters::ContentGenerator;
use crate::config::paths::RESEARCH_CHAT_KEY;
use crate::domain::{Message, Role};
use crate::library::Confirmation;
use crate::store::{KeyValueStore, StoreError};

/// First message of every fresh conversation
pub const WELCOME: &str = "Hello! I am Skoolify AI. I can research any academic topic for you. \
What would you like to learn today?";

/// Shown in place of an answer when the generator fails
pub const APOLOGY: &str = "I'm sorry, I encountered an error while researching. \
Please check your API key or connection.";

/// Persisted research conversation
pub struct ResearchChat {
    store: Arc<dyn KeyValueStore>,
    messages: Vec<Message>,
}

impl ResearchChat {
    /// Load the conversation; absent or malformed history starts fresh
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let messages = match store.get(RESEARCH_CHAT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Message>>(&raw) {
                Ok(messages) if !messages.is_empty() => messages,
                Ok(_) => welcome(),
                Err(e) => {
                    warn!(error = %e, "Malformed research history, starting fresh");
                    welcome()
                }
            },
            Ok(None) => welcome(),
            Err(e) => {
                warn!(error = %e, "Failed to read research history, starting fresh");
                welcome()
            }
        };

        debug!(count = messages.len(), "Research chat loaded");
        Self { store, messages }
    }

    /// Messages in chronological order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Ask a question and wait for the answer.
    ///
    /// Returns `None` for blank input. Generator failures are not errors
    /// here: they become an apology message in the conversation.
    pub async fn send(
        &mut self,
        generator: &dyn ContentGenerator,
        text: &str,
    ) -> Result<Option<&Message>, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.messages.push(Message::new(Role::User, text));
        self.persist()?;

        let reply = match generator.research_query(text).await {
            Ok(answer) => {
                info!(sources = answer.sources.len(), "Research answer received");
                Message::new(Role::Ai, answer.text).with_sources(answer.sources)
            }
            Err(e) => {
                error!(error = %e, backend = generator.name(), "Research query failed");
                Message::new(Role::Ai, APOLOGY)
            }
        };

        self.messages.push(reply);
        self.persist()?;

        Ok(self.messages.last())
    }

    /// Reset to the welcome message after confirmation
    pub fn clear(&mut self, confirmation: &dyn Confirmation) -> Result<bool, StoreError> {
        if !confirmation.confirm("Clear the research history?") {
            return Ok(false);
        }

        self.messages = welcome();
        self.persist()?;
        info!("Research history cleared");
        Ok(true)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.messages)?;
        self.store.set(RESEARCH_CHAT_KEY, &json)
    }
}

fn welcome() -> Vec<Message> {
    vec![Message::new(Role::Ai, WELCOME)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ResearchAnswer;
    use crate::domain::{QuizDefinition, Source, VideoDescriptor};
    use crate::library::AutoConfirm;
    use crate::store::MemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;

    /// Answers with a fixed text, or fails when `fail` is set
    struct Echo {
        fail: bool,
    }

    #[async_trait]
    impl ContentGenerator for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn research_query(&self, text: &str) -> Result<ResearchAnswer> {
            if self.fail {
                anyhow::bail!("network down");
            }
            Ok(ResearchAnswer {
                text: format!("About {}", text),
                sources: vec![Source {
                    title: "Wiki".to_string(),
                    uri: "https://example.org".to_string(),
                }],
            })
        }

        async fn find_videos(&self, _: &str, _: &str, _: &str) -> Result<Vec<VideoDescriptor>> {
            Ok(Vec::new())
        }

        async fn generate_notes(&self, _: &str, _: &str, _: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn generate_study_plan(&self, _: &str, _: &str, _: &str) -> Result<String> {
            Ok(String::new())
        }

        async fn generate_quiz(&self, topic: &str, _: &str, _: &str, _: &str) -> Result<QuizDefinition> {
            Ok(QuizDefinition::new(topic, Vec::new()))
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_fresh_chat_has_welcome() {
        let chat = ResearchChat::load(Arc::new(MemoryStore::new()));
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Ai);
        assert_eq!(chat.messages()[0].content, WELCOME);
    }

    #[test]
    fn test_malformed_history_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set(RESEARCH_CHAT_KEY, "[{\"id\":").unwrap();

        let chat = ResearchChat::load(store);
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let mut chat = ResearchChat::load(Arc::new(MemoryStore::new()));
        let reply = chat.send(&Echo { fail: false }, "   ").await.unwrap();

        assert!(reply.is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_answer_carries_sources() {
        let mut chat = ResearchChat::load(Arc::new(MemoryStore::new()));
        let reply = chat
            .send(&Echo { fail: false }, "Photosynthesis")
            .await
            .unwrap()
            .cloned()
            .unwrap();

        assert_eq!(reply.content, "About Photosynthesis");
        assert_eq!(reply.sources.len(), 1);
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[1].role, Role::User);
    }

    #[tokio::test]
    async fn test_failure_appends_apology() {
        let mut chat = ResearchChat::load(Arc::new(MemoryStore::new()));
        let reply = chat
            .send(&Echo { fail: true }, "Gravity")
            .await
            .unwrap()
            .cloned()
            .unwrap();

        assert_eq!(reply.role, Role::Ai);
        assert_eq!(reply.content, APOLOGY);
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut chat = ResearchChat::load(store.clone());
        chat.send(&Echo { fail: false }, "Atoms").await.unwrap();

        assert!(!chat.clear(&AutoConfirm(false)).unwrap());
        assert_eq!(chat.messages().len(), 3);

        assert!(chat.clear(&AutoConfirm(true)).unwrap());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(ResearchChat::load(store).messages().len(), 1);
    }
}
