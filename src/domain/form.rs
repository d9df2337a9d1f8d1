//! Create-form input shared by every library section.

use serde::{Deserialize, Serialize};

/// Difficulty used when a quiz form leaves the level empty
pub const DEFAULT_LEVEL: &str = "Intermediate";

/// What the user typed into a create form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub topic: String,
    pub class_name: String,
    #[serde(default)]
    pub instructions: String,
    /// Quiz difficulty (quiz form only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl FormInput {
    pub fn new(topic: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            class_name: class_name.into(),
            instructions: String::new(),
            level: None,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Quiz difficulty, falling back to the default level
    pub fn level(&self) -> &str {
        self.level
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_defaults() {
        let input = FormInput::new("Fractions", "Grade 4");
        assert_eq!(input.level(), DEFAULT_LEVEL);

        let input = input.with_level("  ");
        assert_eq!(input.level(), DEFAULT_LEVEL);

        let input = FormInput::new("Fractions", "Grade 4").with_level("Hard");
        assert_eq!(input.level(), "Hard");
    }
}
