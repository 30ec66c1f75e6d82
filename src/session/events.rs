//! Boundary payloads exchanged with the speech collaborator

use crate::core::SessionId;
use serde::{Deserialize, Serialize};

/// One word the child was expected to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAttempt {
    pub word: String,
    pub correct: bool,
    /// Time from the previous word to this one, 0 for skipped words
    pub latency_ms: u64,
    pub session_id: SessionId,
    /// The reading never reached this word; counts against the session, not the word
    #[serde(default)]
    pub skipped: bool,
}

impl WordAttempt {
    pub fn read(
        word: impl Into<String>,
        correct: bool,
        latency_ms: u64,
        session_id: SessionId,
    ) -> Self {
        Self {
            word: word.into(),
            correct,
            latency_ms,
            session_id,
            skipped: false,
        }
    }

    pub fn skipped(word: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            word: word.into(),
            correct: false,
            latency_ms: 0,
            session_id,
            skipped: true,
        }
    }
}

/// A word recognized by the speech collaborator, with timing
///
/// Times are relative to the start of the page's recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }
}
