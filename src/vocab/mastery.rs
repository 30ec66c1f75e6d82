//! Mastery classification
//!
//! A word's category is derived from its counters every time it is needed.
//! Nothing here is cached, so a category can never go stale.

use crate::core::MasteryThresholds;
use crate::vocab::record::WordRecord;
use serde::{Deserialize, Serialize};

/// Learned status of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryCategory {
    /// Never attempted
    New,
    /// Seen, not enough evidence either way
    Learning,
    /// Reliably read correctly
    Mastered,
    /// Repeatedly misread
    Tricky,
}

impl MasteryCategory {
    /// Words of this category may appear in a story as review words
    pub fn is_reviewable(&self) -> bool {
        !matches!(self, MasteryCategory::New)
    }
}

/// Classify a record (or its absence)
///
/// MASTERED is checked before TRICKY. With sane thresholds the two cannot
/// both hold, but the order settles it regardless.
pub fn classify(record: Option<&WordRecord>, thresholds: &MasteryThresholds) -> MasteryCategory {
    let Some(record) = record.filter(|r| r.attempts > 0) else {
        return MasteryCategory::New;
    };

    let enough_evidence = record.attempts >= thresholds.min_attempts;
    let accuracy = record.accuracy();

    if enough_evidence
        && accuracy >= thresholds.mastered_accuracy
        && record.consecutive_correct >= thresholds.min_streak
    {
        MasteryCategory::Mastered
    } else if enough_evidence && accuracy < thresholds.tricky_accuracy {
        MasteryCategory::Tricky
    } else {
        MasteryCategory::Learning
    }
}

impl WordRecord {
    pub fn mastery(&self, thresholds: &MasteryThresholds) -> MasteryCategory {
        classify(Some(self), thresholds)
    }
}
