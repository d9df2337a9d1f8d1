//! Saved library items.
//!
//! Every section except research chat stores its output as a `SavedItem`.
//! The payload is tagged by kind, so the shape of the content is always
//! known from the variant and never has to be checked at runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::FormInput;
use super::quiz::QuizResult;
use super::video::VideoDescriptor;

/// Unique identifier of a saved item (random UUID v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Kind of saved content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Curated list of video lessons
    VideoCollection,

    /// Generated lesson note (markdown)
    Note,

    /// Generated study plan (markdown)
    StudyPlan,

    /// Finished quiz with its score
    QuizResult,
}

impl ContentKind {
    /// All kinds, in sidebar order
    pub const ALL: [ContentKind; 4] = [
        ContentKind::VideoCollection,
        ContentKind::Note,
        ContentKind::StudyPlan,
        ContentKind::QuizResult,
    ];

    /// Key of the collection holding items of this kind
    pub fn storage_key(&self) -> &'static str {
        match self {
            ContentKind::VideoCollection => "skoolify_library_video",
            ContentKind::Note => "skoolify_library_notes",
            ContentKind::StudyPlan => "skoolify_library_study",
            ContentKind::QuizResult => "skoolify_library_quiz",
        }
    }

    /// Section title shown above the collection
    pub fn title(&self) -> &'static str {
        match self {
            ContentKind::VideoCollection => "Video Collections",
            ContentKind::Note => "Lesson Notes",
            ContentKind::StudyPlan => "Study Plans",
            ContentKind::QuizResult => "Quiz Results",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::VideoCollection => write!(f, "video"),
            ContentKind::Note => write!(f, "note"),
            ContentKind::StudyPlan => write!(f, "study"),
            ContentKind::QuizResult => write!(f, "quiz"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "video" | "videos" => Ok(ContentKind::VideoCollection),
            "note" | "notes" => Ok(ContentKind::Note),
            "study" | "study_plan" | "plan" => Ok(ContentKind::StudyPlan),
            "quiz" | "quizzes" => Ok(ContentKind::QuizResult),
            _ => anyhow::bail!("Unknown content kind: {}", s),
        }
    }
}

/// Kind-specific content body of a saved item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    VideoCollection(Vec<VideoDescriptor>),
    Note(String),
    StudyPlan(String),
    QuizResult(QuizResult),
}

impl Payload {
    /// The content kind this payload belongs to
    pub fn kind(&self) -> ContentKind {
        match self {
            Payload::VideoCollection(_) => ContentKind::VideoCollection,
            Payload::Note(_) => ContentKind::Note,
            Payload::StudyPlan(_) => ContentKind::StudyPlan,
            Payload::QuizResult(_) => ContentKind::QuizResult,
        }
    }
}

/// A persisted unit of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItem {
    /// Unique identifier
    pub id: ItemId,

    /// Free-text topic from the create form
    pub topic: String,

    /// Free-text class/grade label from the create form
    pub class_name: String,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// Kind-tagged content
    pub payload: Payload,
}

impl SavedItem {
    /// Create a new item from a finished payload and the form that produced it
    pub fn new(payload: Payload, input: &FormInput) -> Self {
        Self {
            id: ItemId::new(),
            topic: input.topic.clone(),
            class_name: input.class_name.clone(),
            created_at: Utc::now(),
            payload,
        }
    }

    /// Kind of this item (fixed by its payload)
    pub fn kind(&self) -> ContentKind {
        self.payload.kind()
    }
}
