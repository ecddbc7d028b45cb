//! Game configuration.
//!
//! Settings are provided by the UI at game creation and travel with the
//! record through serialization. The engine only interprets `category` and
//! `custom_word` (word-pool resolution); the timer durations and sound flag
//! are carried for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Seconds each player gets to give their clue.
    pub turn_seconds: u32,

    /// Seconds of open discussion before voting.
    pub discussion_seconds: u32,

    /// Word category name. The umbrella "general" category resolves to the
    /// union of all catalog categories.
    pub category: String,

    /// Overrides the category pool with a single fixed word when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_word: Option<String>,

    /// Audio cues on timer events (presentation-only).
    pub sounds_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_seconds: 60,
            discussion_seconds: 120,
            category: crate::words::GENERAL_CATEGORY.to_string(),
            custom_word: None,
            sounds_enabled: true,
        }
    }
}

impl GameSettings {
    /// Create settings with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clue timer duration.
    #[must_use]
    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = seconds;
        self
    }

    /// Set the discussion timer duration.
    #[must_use]
    pub fn with_discussion_seconds(mut self, seconds: u32) -> Self {
        self.discussion_seconds = seconds;
        self
    }

    /// Set the word category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Fix the secret word instead of drawing from a category.
    #[must_use]
    pub fn with_custom_word(mut self, word: impl Into<String>) -> Self {
        self.custom_word = Some(word.into());
        self
    }

    /// Enable or disable audio cues.
    #[must_use]
    pub fn with_sounds(mut self, enabled: bool) -> Self {
        self.sounds_enabled = enabled;
        self
    }

    /// The custom word, trimmed, if it is set and non-blank.
    #[must_use]
    pub fn effective_custom_word(&self) -> Option<&str> {
        self.custom_word
            .as_deref()
            .map(str::trim)
            .filter(|word| !word.is_empty())
    }

    /// Check structural validity: timers positive, category named.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.turn_seconds == 0 {
            return Err(EngineError::InvalidConfiguration(
                "turn timer must be positive".to_string(),
            ));
        }
        if self.discussion_seconds == 0 {
            return Err(EngineError::InvalidConfiguration(
                "discussion timer must be positive".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "category must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::default();

        assert_eq!(settings.turn_seconds, 60);
        assert_eq!(settings.discussion_seconds, 120);
        assert_eq!(settings.category, "general");
        assert_eq!(settings.custom_word, None);
        assert!(settings.sounds_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let settings = GameSettings::new()
            .with_turn_seconds(30)
            .with_discussion_seconds(90)
            .with_category("Comida")
            .with_custom_word("bacalhau")
            .with_sounds(false);

        assert_eq!(settings.turn_seconds, 30);
        assert_eq!(settings.discussion_seconds, 90);
        assert_eq!(settings.category, "Comida");
        assert_eq!(settings.effective_custom_word(), Some("bacalhau"));
        assert!(!settings.sounds_enabled);
    }

    #[test]
    fn test_blank_custom_word_is_ignored() {
        let settings = GameSettings::new().with_custom_word("   ");
        assert_eq!(settings.effective_custom_word(), None);

        let settings = GameSettings::new().with_custom_word("  praia ");
        assert_eq!(settings.effective_custom_word(), Some("praia"));
    }

    #[test]
    fn test_validate_rejects_zero_timers() {
        assert!(GameSettings::new().with_turn_seconds(0).validate().is_err());
        assert!(GameSettings::new()
            .with_discussion_seconds(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_blank_category() {
        assert!(GameSettings::new().with_category("  ").validate().is_err());
    }

    #[test]
    fn test_serde_omits_absent_custom_word() {
        let json = serde_json::to_string(&GameSettings::default()).unwrap();
        assert!(!json.contains("customWord"));
        assert!(json.contains("\"turnSeconds\":60"));

        let back: GameSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameSettings::default());
    }
}
