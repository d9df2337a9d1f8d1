//! Parsing of model output into structured content.
//!
//! Model output is untrusted text. Anything that does not parse degrades to
//! an empty result so the caller can show "no results" instead of failing.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{QuizDefinition, QuizQuestion, VideoDescriptor};

/// Remove markdown code fences the model sometimes wraps JSON in
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model text as JSON, returning `None` (and logging) on failure
pub fn parse_json(text: &str) -> Option<Value> {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str(&cleaned) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Model returned invalid JSON");
            None
        }
    }
}

/// Video entry as the extraction prompt asks for it
#[derive(Debug, Deserialize)]
struct RawVideo {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    #[serde(alias = "channelTitle", alias = "channelName")]
    channel: Option<String>,
    duration: Option<String>,
}

/// Parse a list of videos from model output.
///
/// Accepts a bare array or an object with a `videos` array. Entries without
/// a title or URL are dropped.
pub fn parse_videos(text: &str) -> Vec<VideoDescriptor> {
    let entries = match parse_json(text) {
        Some(Value::Array(entries)) => entries,
        Some(Value::Object(mut map)) => match map.remove("videos") {
            Some(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawVideo>(entry).ok())
        .filter_map(|raw| {
            let title = raw.title.filter(|t| !t.trim().is_empty())?;
            let url = raw.url.filter(|u| !u.trim().is_empty())?;

            let mut video = VideoDescriptor::new(title, url, raw.description.unwrap_or_default());
            video.channel_name = raw.channel.filter(|c| !c.trim().is_empty());
            video.duration = raw.duration;
            Some(video)
        })
        .collect()
}

/// Parse a quiz from model output.
///
/// Output without a `questions` array yields a quiz with no questions for
/// the requested topic. Individual malformed questions, including ones
/// with no options to choose from, are skipped.
pub fn parse_quiz(text: &str, requested_topic: &str) -> QuizDefinition {
    let Some(Value::Object(mut map)) = parse_json(text) else {
        return QuizDefinition::new(requested_topic, Vec::new());
    };

    let questions = match map.remove("questions") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<QuizQuestion>(entry).ok())
            .filter(|question| !question.options.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    let topic = map
        .get("topic")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(requested_topic);

    QuizDefinition::new(topic, questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  [1] "), "[1]");
    }

    #[test]
    fn test_parse_videos_array() {
        let text = r#"```json
        [
          {"title": "Photosynthesis", "url": "https://www.youtube.com/watch?v=abc", "description": "Intro", "channel": "Bio"},
          {"title": "", "url": "https://youtu.be/zzz"},
          {"title": "No url"},
          {"title": "Cells", "url": "https://vimeo.com/42"}
        ]
        ```"#;

        let videos = parse_videos(text);
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].embed_id.as_deref(), Some("abc"));
        assert_eq!(videos[0].channel_name.as_deref(), Some("Bio"));
        assert!(videos[1].embed_id.is_none());
    }

    #[test]
    fn test_parse_videos_wrapped_object() {
        let text = r#"{"videos": [{"title": "T", "url": "https://youtu.be/id1"}]}"#;
        let videos = parse_videos(text);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].embed_id.as_deref(), Some("id1"));

        assert!(parse_videos(r#"{"results": []}"#).is_empty());
    }

    #[test]
    fn test_parse_videos_garbage() {
        assert!(parse_videos("Sorry, I could not find any videos.").is_empty());
    }

    #[test]
    fn test_parse_quiz() {
        let text = r#"{
          "topic": "Photosynthesis",
          "questions": [
            {"question": "Q1", "options": ["a", "b"], "correctAnswer": "a", "explanation": "because"},
            {"options": ["x"]}
          ]
        }"#;

        let quiz = parse_quiz(text, "photo");
        assert_eq!(quiz.topic, "Photosynthesis");
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].correct_option, "a");
    }

    #[test]
    fn test_parse_quiz_skips_questions_without_options() {
        let text = r#"{"topic": "T", "questions": [
            {"question": "Q1", "correctAnswer": "a"},
            {"question": "Q2", "options": [], "correctAnswer": "b"},
            {"question": "Q3", "options": ["c", "d"], "correctAnswer": "c"}
        ]}"#;

        let quiz = parse_quiz(text, "T");
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].prompt, "Q3");

        let only_empty = r#"{"topic": "T", "questions": [{"question": "Q1", "correctAnswer": "a"}]}"#;
        assert!(parse_quiz(only_empty, "T").is_empty());
    }

    #[test]
    fn test_parse_quiz_degrades_to_empty() {
        let quiz = parse_quiz("not json at all", "Fractions");
        assert_eq!(quiz.topic, "Fractions");
        assert!(quiz.is_empty());

        let quiz = parse_quiz(r#"{"topic": "X"}"#, "Fractions");
        assert!(quiz.is_empty());
    }
}
