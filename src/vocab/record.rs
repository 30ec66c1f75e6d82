//! Per-word reading statistics

use crate::core::SessionId;
use serde::{Deserialize, Serialize};

/// Reading history of a single word for one learner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    /// Normalized lowercase token
    pub word: String,
    /// Times the word was presented for reading
    pub attempts: u32,
    /// Times it was read correctly
    pub correct: u32,
    /// Current run of correct reads, reset by any miss
    pub consecutive_correct: u32,
    /// Most recent session that touched this word
    pub last_seen_session: SessionId,
}

impl WordRecord {
    /// Record for a word seen for the first time
    pub fn first_attempt(word: String, session: SessionId, was_correct: bool) -> Self {
        let hit = u32::from(was_correct);
        Self {
            word,
            attempts: 1,
            correct: hit,
            consecutive_correct: hit,
            last_seen_session: session,
        }
    }

    pub(crate) fn apply(&mut self, session: &SessionId, was_correct: bool) {
        self.attempts += 1;
        if was_correct {
            self.correct += 1;
            self.consecutive_correct += 1;
        } else {
            self.consecutive_correct = 0;
        }
        if &self.last_seen_session != session {
            self.last_seen_session = session.clone();
        }
    }

    /// correct / attempts, 0.0 before the first attempt
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64
        }
    }

    /// Does the record satisfy `consecutive_correct <= correct <= attempts`?
    pub fn is_consistent(&self) -> bool {
        self.correct <= self.attempts && self.consecutive_correct <= self.correct
    }

    pub(crate) fn stats(&self) -> WordStats {
        WordStats {
            attempts: self.attempts,
            correct: self.correct,
            consecutive_correct: self.consecutive_correct,
            last_seen_session: self.last_seen_session.clone(),
        }
    }
}

/// Persisted form of a record; the word itself is the map key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub attempts: u32,
    pub correct: u32,
    pub consecutive_correct: u32,
    pub last_seen_session: SessionId,
}

impl WordStats {
    pub(crate) fn into_record(self, word: String) -> WordRecord {
        WordRecord {
            word,
            attempts: self.attempts,
            correct: self.correct,
            consecutive_correct: self.consecutive_correct,
            last_seen_session: self.last_seen_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_counts() {
        let hit = WordRecord::first_attempt("cat".into(), "s1".into(), true);
        assert_eq!((hit.attempts, hit.correct, hit.consecutive_correct), (1, 1, 1));

        let miss = WordRecord::first_attempt("dog".into(), "s1".into(), false);
        assert_eq!((miss.attempts, miss.correct, miss.consecutive_correct), (1, 0, 0));
    }

    #[test]
    fn test_miss_resets_streak() {
        let mut record = WordRecord::first_attempt("sun".into(), "s1".into(), true);
        record.apply(&"s1".into(), true);
        assert_eq!(record.consecutive_correct, 2);

        record.apply(&"s2".into(), false);
        assert_eq!(record.consecutive_correct, 0);
        assert_eq!(record.correct, 2);
        assert_eq!(record.attempts, 3);
        assert_eq!(record.last_seen_session, SessionId::from("s2"));
    }

    #[test]
    fn test_accuracy() {
        let mut record = WordRecord::first_attempt("hat".into(), "s1".into(), false);
        record.apply(&"s1".into(), true);
        assert!((record.accuracy() - 0.5).abs() < f64::EPSILON);
    }
}
