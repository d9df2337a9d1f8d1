//! Kind-specific create and view workflows.
//!
//! Each content kind knows how to draft a new payload from a form (one
//! generation call) and how to render a saved item as plain text. Quizzes
//! are the exception on the create side: the draft is a quiz definition
//! that has to be taken before there is anything to save.

use anyhow::Result;
use tracing::{info, warn};

use crate::adapters::ContentGenerator;
use crate::domain::{
    ContentKind, FormInput, Payload, QuizDefinition, QuizResult, SavedItem, VideoDescriptor,
};

/// Output of a create workflow
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// Ready to save as-is
    Ready(Payload),

    /// A quiz that must be taken; its result is what gets saved
    Quiz(QuizDefinition),
}

impl ContentKind {
    /// Label of the button that starts the create workflow
    pub fn create_label(&self) -> &'static str {
        match self {
            ContentKind::VideoCollection => "Search Videos",
            ContentKind::Note => "New Note",
            ContentKind::StudyPlan => "New Plan",
            ContentKind::QuizResult => "New Quiz",
        }
    }

    /// Run the create workflow for this kind against the generator
    pub async fn draft(
        &self,
        generator: &dyn ContentGenerator,
        input: &FormInput,
    ) -> Result<Draft> {
        info!(kind = %self, topic = %input.topic, backend = generator.name(), "Generating content");

        let draft = match self {
            ContentKind::VideoCollection => {
                let videos = generator
                    .find_videos(&input.topic, &input.class_name, &input.instructions)
                    .await?;
                Draft::Ready(Payload::VideoCollection(videos))
            }
            ContentKind::Note => {
                let markdown = generator
                    .generate_notes(&input.topic, &input.class_name, &input.instructions)
                    .await?;
                Draft::Ready(Payload::Note(markdown))
            }
            ContentKind::StudyPlan => {
                let markdown = generator
                    .generate_study_plan(&input.topic, &input.class_name, &input.instructions)
                    .await?;
                Draft::Ready(Payload::StudyPlan(markdown))
            }
            ContentKind::QuizResult => {
                let quiz = generator
                    .generate_quiz(
                        &input.topic,
                        &input.class_name,
                        input.level(),
                        &input.instructions,
                    )
                    .await?;

                if quiz.is_empty() {
                    anyhow::bail!("No quiz questions were generated for \"{}\"", input.topic);
                }

                for (i, question) in quiz.questions.iter().enumerate() {
                    if !question.has_valid_answer() {
                        warn!(question = i + 1, "Correct answer does not match exactly one option");
                    }
                }

                Draft::Quiz(quiz)
            }
        };

        Ok(draft)
    }
}

/// Render a saved item as plain text
pub fn render(item: &SavedItem) -> String {
    let mut out = format!(
        "{}\n{} | {} | {}\n\n",
        item.topic,
        item.kind().title(),
        if item.class_name.is_empty() {
            "-"
        } else {
            item.class_name.as_str()
        },
        item.created_at.format("%b %-d, %Y")
    );

    match &item.payload {
        Payload::VideoCollection(videos) => out.push_str(&render_videos(videos)),
        Payload::Note(markdown) | Payload::StudyPlan(markdown) => out.push_str(markdown),
        Payload::QuizResult(result) => out.push_str(&render_quiz_result(result)),
    }

    out
}

fn render_videos(videos: &[VideoDescriptor]) -> String {
    if videos.is_empty() {
        return "No videos found.".to_string();
    }

    let mut out = String::new();
    for (i, video) in videos.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, video.title));
        if let Some(channel) = &video.channel_name {
            out.push_str(&format!("   Channel: {}\n", channel));
        }
        if let Some(duration) = &video.duration {
            out.push_str(&format!("   Duration: {}\n", duration));
        }
        out.push_str(&format!("   {}\n", video.url));
        if !video.description.is_empty() {
            out.push_str(&format!("   {}\n", video.description));
        }
        out.push('\n');
    }
    out
}

fn render_quiz_result(result: &QuizResult) -> String {
    let mut out = format!(
        "Score: {}% ({}/{})\n\nQuestion Review\n",
        result.percentage(),
        result.score,
        result.total_questions
    );

    for (i, question) in result.quiz.questions.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, question.prompt));
        out.push_str(&format!("   Answer: {}\n", question.correct_option));
        if !question.explanation.is_empty() {
            out.push_str(&format!("   {}\n", question.explanation));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuizQuestion;
    use chrono::Utc;

    #[test]
    fn test_render_note_is_verbatim() {
        let item = SavedItem::new(
            Payload::Note("# Photosynthesis\n- light".to_string()),
            &FormInput::new("Photosynthesis", "Grade 10"),
        );
        let text = render(&item);
        assert!(text.starts_with("Photosynthesis\nLesson Notes | Grade 10 | "));
        assert!(text.ends_with("# Photosynthesis\n- light"));
    }

    #[test]
    fn test_render_videos() {
        let videos = vec![
            VideoDescriptor::new("Intro", "https://youtu.be/a1", "Basics").with_channel("Bio Lab"),
        ];
        let item = SavedItem::new(
            Payload::VideoCollection(videos),
            &FormInput::new("Cells", ""),
        );
        let text = render(&item);
        assert!(text.contains("| - |"));
        assert!(text.contains("1. Intro"));
        assert!(text.contains("Channel: Bio Lab"));
        assert!(text.contains("https://youtu.be/a1"));

        let empty = SavedItem::new(Payload::VideoCollection(vec![]), &FormInput::new("x", "y"));
        assert!(render(&empty).ends_with("No videos found."));
    }

    #[test]
    fn test_render_quiz_result() {
        let result = QuizResult {
            quiz: QuizDefinition::new(
                "Math",
                vec![QuizQuestion {
                    prompt: "2 + 2?".to_string(),
                    options: vec!["3".to_string(), "4".to_string()],
                    correct_option: "4".to_string(),
                    explanation: "Two pairs.".to_string(),
                }],
            ),
            score: 1,
            total_questions: 1,
            completed_at: Utc::now(),
        };
        let item = SavedItem::new(Payload::QuizResult(result), &FormInput::new("Math", "3"));
        let text = render(&item);
        assert!(text.contains("Score: 100% (1/1)"));
        assert!(text.contains("1. 2 + 2?"));
        assert!(text.contains("Answer: 4"));
    }
}
