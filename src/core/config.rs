//! Learning configuration with documented constants
//!
//! Every threshold the classifier, selector and fluency scoring depend on
//! lives here. Call sites take a reference to the relevant section instead of
//! embedding literals.

use crate::core::error::{Result, SproutError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds for the mastery classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasteryThresholds {
    /// Attempts required before a word can be judged MASTERED or TRICKY
    ///
    /// Below this count every seen word is LEARNING, no matter how it went.
    pub min_attempts: u32,

    /// Accuracy (correct / attempts) at or above which a word may be MASTERED
    pub mastered_accuracy: f64,

    /// Accuracy strictly below which a word is TRICKY
    ///
    /// Must stay below `mastered_accuracy` so the two categories are disjoint.
    pub tricky_accuracy: f64,

    /// Consecutive correct reads required for MASTERED
    ///
    /// A single miss resets the streak, so a mastered word that is misread
    /// drops back to LEARNING until the streak is rebuilt.
    pub min_streak: u32,
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self {
            min_attempts: 3,
            mastered_accuracy: 0.8,
            tricky_accuracy: 0.5,
            min_streak: 3,
        }
    }
}

/// Defaults for story vocabulary selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Distinct words a generated story should draw on
    pub target_story_word_count: usize,

    /// Share of the target reserved for words the child has not met yet
    ///
    /// At 0.3 with a target of 20, six slots go to new words and fourteen to
    /// review. Unfilled review slots are handed back to new words.
    pub new_word_ratio: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            target_story_word_count: 20,
            new_word_ratio: 0.3,
        }
    }
}

/// Fluency scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluencyConfig {
    /// Reading speed that earns the full speed component (words per minute)
    ///
    /// 30 WPM sits in the middle of the typical 20-40 WPM range for
    /// five-year-olds reading aloud.
    pub target_words_per_minute: f64,

    /// Weight of accuracy in the fluency score; speed gets the remainder
    pub accuracy_weight: f64,
}

impl Default for FluencyConfig {
    fn default() -> Self {
        Self {
            target_words_per_minute: 30.0,
            accuracy_weight: 0.7,
        }
    }
}

/// Top-level configuration, loadable from TOML
///
/// ```toml
/// [mastery]
/// min_attempts = 4
///
/// [selection]
/// new_word_ratio = 0.25
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub mastery: MasteryThresholds,
    pub selection: SelectionConfig,
    pub fluency: FluencyConfig,
}

impl LearningConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LearningConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded learning config");
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let m = &self.mastery;
        for (name, value) in [
            ("mastered_accuracy", m.mastered_accuracy),
            ("tricky_accuracy", m.tricky_accuracy),
            ("new_word_ratio", self.selection.new_word_ratio),
            ("accuracy_weight", self.fluency.accuracy_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SproutError::Config(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if m.tricky_accuracy >= m.mastered_accuracy {
            return Err(SproutError::Config(format!(
                "tricky_accuracy ({}) should be < mastered_accuracy ({})",
                m.tricky_accuracy, m.mastered_accuracy
            )));
        }

        if m.min_attempts == 0 {
            return Err(SproutError::Config("min_attempts must be positive".into()));
        }

        if self.selection.target_story_word_count == 0 {
            return Err(SproutError::Config(
                "target_story_word_count must be positive".into(),
            ));
        }

        if self.fluency.target_words_per_minute <= 0.0 {
            return Err(SproutError::Config(
                "target_words_per_minute must be positive".into(),
            ));
        }

        Ok(())
    }
}
