//! Core type definitions used throughout the codebase

use crate::core::error::{Result, SproutError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of one reading session
///
/// Generated ids are UUIDv7, so comparing two generated ids as strings
/// orders them by creation time. Ids supplied by a collaborator are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time in Unix milliseconds, for generated (UUIDv7) ids only
    pub fn recorded_at_ms(&self) -> Option<u64> {
        let uuid = Uuid::parse_str(&self.0).ok()?;
        if uuid.get_version_num() != 7 {
            return None;
        }
        // leading 48 bits are the Unix time in milliseconds
        let b = uuid.as_bytes();
        Some(u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]]))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reading level of a learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ReadingLevel {
    /// Starter vocabulary the story writer may draw new words from
    pub fn starter_words(&self) -> &'static [&'static str] {
        match self {
            ReadingLevel::Beginner => &[
                "cat", "dog", "hat", "run", "big", "red", "sun", "fun", "map", "top", "see",
                "the", "a", "is", "in", "on", "at", "to", "and", "of",
            ],
            ReadingLevel::Intermediate => &[
                "house", "tree", "book", "play", "walk", "jump", "sing", "read", "write", "draw",
                "happy", "sad", "good", "bad", "fast", "slow", "hot", "cold", "new", "old",
            ],
            ReadingLevel::Advanced => &[
                "beautiful", "wonderful", "amazing", "exciting", "adventure", "journey",
                "discover", "explore", "imagine", "create", "celebrate", "friendship",
                "kindness", "bravery", "wisdom",
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "beginner",
            ReadingLevel::Intermediate => "intermediate",
            ReadingLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReadingLevel {
    type Err = SproutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ReadingLevel::Beginner),
            "intermediate" => Ok(ReadingLevel::Intermediate),
            "advanced" => Ok(ReadingLevel::Advanced),
            other => Err(SproutError::InvalidInput(format!(
                "unknown reading level: {}",
                other
            ))),
        }
    }
}

/// Who is looking at the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UserView {
    Child,
    Parent,
}

/// Normalize a vocabulary token to its lowercase key
///
/// Accepts letters with optional internal apostrophes or hyphens
/// ("don't", "ice-cream"). Anything else is rejected.
pub fn normalize_word(raw: &str) -> Result<String> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        return Err(SproutError::InvalidInput("empty word token".into()));
    }

    let chars: Vec<char> = word.chars().collect();
    let last = chars.len() - 1;
    let valid = chars.iter().enumerate().all(|(i, c)| {
        c.is_alphabetic() || ((*c == '\'' || *c == '-') && i != 0 && i != last)
    });

    if !valid {
        return Err(SproutError::InvalidInput(format!(
            "not a word token: {:?}",
            raw
        )));
    }
    Ok(word)
}

/// Strip surrounding punctuation from running text, then normalize
///
/// "Cat," -> "cat", "\"Hello!\"" -> "hello". Used on page text and
/// transcripts, where tokens carry sentence punctuation.
pub fn normalize_text_token(raw: &str) -> Result<String> {
    let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric());
    normalize_word(trimmed)
}
