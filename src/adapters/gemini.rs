//! Gemini REST adapter.
//!
//! Talks to `POST {base_url}/models/{model}:generateContent`. Research and
//! video discovery enable the Google Search tool and read grounding sources
//! from the response; quizzes and video extraction use JSON mode.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use super::{extract, prompts, ContentGenerator, ResearchAnswer};
use crate::config::GeminiSettings;
use crate::domain::{video, QuizDefinition, Source, VideoDescriptor};

const FALLBACK_RESEARCH: &str = "I couldn't generate a response.";
const FALLBACK_NOTES: &str = "Could not generate notes.";
const FALLBACK_STUDY: &str = "Could not generate study material.";

/// Gemini API client
pub struct GeminiAdapter {
    /// HTTP client (carries the request timeout)
    client: reqwest::Client,
    /// API key sent as `x-goog-api-key`
    api_key: String,
    /// Endpoint and model settings
    settings: GeminiSettings,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    fn user(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: text.into() }],
            }],
            system_instruction: None,
            tools: Vec::new(),
            generation_config: None,
        }
    }

    fn with_system(mut self, text: &str) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        });
        self
    }

    fn with_search(mut self) -> Self {
        self.tools.push(Tool {
            google_search: EmptyObject {},
        });
        self
    }

    fn with_json_output(mut self, schema: Option<Value>) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: schema,
        });
        self
    }
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Web sources from the first candidate's grounding metadata
    fn sources(&self) -> Vec<Source> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        Some(Source {
                            title: web.title.clone()?,
                            uri: web.uri.clone()?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Schema the quiz response must follow
fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctAnswer": { "type": "STRING" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswer", "explanation"]
                }
            }
        },
        "required": ["topic", "questions"]
    })
}

// ============================================================================
// Adapter
// ============================================================================

impl GeminiAdapter {
    /// Create an adapter with an explicit key and settings
    pub fn new(api_key: impl Into<String>, settings: GeminiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
        })
    }

    /// Create an adapter from the resolved configuration
    pub fn from_config() -> Result<Self> {
        let cfg = crate::config::config()?;
        let api_key = cfg.gemini.api_key.clone().context(
            "No Gemini API key configured. Set GEMINI_API_KEY or gemini.api_key in .skoolify/config.yaml",
        )?;
        Self::new(api_key, cfg.gemini.clone())
    }

    /// Build the generateContent URL for a model
    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send one generateContent request
    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint(model);
        debug!(%url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            anyhow::bail!("Gemini API error ({}): {}", status, message.trim());
        }

        response
            .json()
            .await
            .context("Failed to parse Gemini response")
    }
}

#[async_trait]
impl ContentGenerator for GeminiAdapter {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, text))]
    async fn research_query(&self, text: &str) -> Result<ResearchAnswer> {
        let request = GenerateRequest::user(text)
            .with_system(prompts::RESEARCH_SYSTEM)
            .with_search();

        let response = self.generate(&self.settings.search_model, &request).await?;

        Ok(ResearchAnswer {
            text: response
                .text()
                .unwrap_or_else(|| FALLBACK_RESEARCH.to_string()),
            sources: response.sources(),
        })
    }

    #[instrument(skip(self, instructions))]
    async fn find_videos(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<Vec<VideoDescriptor>> {
        // Phase 1: grounded search
        let search = GenerateRequest::user(prompts::video_search(topic, class_name, instructions))
            .with_search();
        let search_response = self.generate(&self.settings.search_model, &search).await?;

        let links: Vec<Source> = search_response
            .sources()
            .into_iter()
            .filter(|s| video::is_likely_video(&s.uri))
            .collect();
        debug!(count = links.len(), "Video links found in grounding metadata");

        let context = if links.is_empty() {
            format!(
                "Search Results Text: {}",
                search_response.text().unwrap_or_default()
            )
        } else {
            let listed: Vec<Value> = links
                .iter()
                .map(|l| json!({ "title": l.title, "uri": l.uri }))
                .collect();
            format!(
                "Found these verified video links: {}",
                Value::Array(listed)
            )
        };

        // Phase 2: extraction into strict JSON
        let extraction =
            GenerateRequest::user(prompts::video_extraction(&context)).with_json_output(None);
        let extraction_response = self
            .generate(&self.settings.reasoning_model, &extraction)
            .await?;

        let Some(raw) = extraction_response.text() else {
            warn!("Video extraction returned no text");
            return Ok(Vec::new());
        };

        Ok(extract::parse_videos(&raw))
    }

    #[instrument(skip(self, instructions))]
    async fn generate_notes(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<String> {
        let request = GenerateRequest::user(prompts::lesson_notes(topic, class_name, instructions))
            .with_system(prompts::NOTES_SYSTEM);

        let response = self
            .generate(&self.settings.reasoning_model, &request)
            .await?;

        Ok(response.text().unwrap_or_else(|| FALLBACK_NOTES.to_string()))
    }

    #[instrument(skip(self, instructions))]
    async fn generate_study_plan(
        &self,
        topic: &str,
        class_name: &str,
        instructions: &str,
    ) -> Result<String> {
        let request = GenerateRequest::user(prompts::study_plan(topic, class_name, instructions))
            .with_system(prompts::STUDY_SYSTEM);

        let response = self
            .generate(&self.settings.reasoning_model, &request)
            .await?;

        Ok(response.text().unwrap_or_else(|| FALLBACK_STUDY.to_string()))
    }

    #[instrument(skip(self, instructions))]
    async fn generate_quiz(
        &self,
        topic: &str,
        class_name: &str,
        level: &str,
        instructions: &str,
    ) -> Result<QuizDefinition> {
        let request = GenerateRequest::user(prompts::quiz(topic, class_name, level, instructions))
            .with_json_output(Some(quiz_schema()));

        let response = self.generate(&self.settings.quiz_model, &request).await?;

        let raw = response.text().unwrap_or_else(|| "{}".to_string());
        Ok(extract::parse_quiz(&raw, topic))
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!(
            "{}/models/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.reasoning_model
        );

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        if !response.status().is_success() {
            anyhow::bail!("Gemini health check failed: {}", response.status());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> GeminiAdapter {
        GeminiAdapter::new("KEY", GeminiSettings::default()).unwrap()
    }

    #[test]
    fn test_adapter_name() {
        assert_eq!(adapter().name(), "gemini");
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            adapter().endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest::user("hello")
            .with_system("be nice")
            .with_search();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be nice");
        assert!(json["tools"][0]["googleSearch"].is_object());
        assert!(json.get("generationConfig").is_none());

        let request = GenerateRequest::user("q").with_json_output(Some(quiz_schema()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_and_sources() {
        let body = r#"{
          "candidates": [{
            "content": {"parts": [{"text": "Plants "}, {"text": "make sugar."}]},
            "groundingMetadata": {
              "groundingChunks": [
                {"web": {"uri": "https://example.org/a", "title": "A"}},
                {"web": {"uri": "https://example.org/b"}},
                {}
              ]
            }
          }]
        }"#;

        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text().as_deref(), Some("Plants make sugar."));
        assert_eq!(
            response.sources(),
            vec![Source {
                title: "A".to_string(),
                uri: "https://example.org/a".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_response() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
        assert!(response.sources().is_empty());
    }
}
