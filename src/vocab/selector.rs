//! Story vocabulary selection
//!
//! Picks the known words a new story should reinforce and how many new
//! words it may introduce. TRICKY words come first, then LEARNING words,
//! and MASTERED words only backfill. NEW words are never review words.

use crate::core::{LearningConfig, MasteryThresholds, Result, SproutError};
use crate::vocab::mastery::MasteryCategory;
use crate::vocab::record::WordRecord;
use crate::vocab::store::WordRecordStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category order used to fill review slots
const REVIEW_PRIORITY: [MasteryCategory; 3] = [
    MasteryCategory::Tricky,
    MasteryCategory::Learning,
    MasteryCategory::Mastered,
];

/// Vocabulary handed to the story writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConstraint {
    /// Known words the story should reuse
    pub review_words: BTreeSet<String>,
    /// How many new words the story may introduce (the writer picks them)
    pub new_word_count: usize,
    /// Review slots that could not be filled and went to new words instead
    pub review_shortfall: usize,
}

impl VocabularyConstraint {
    pub fn is_under_filled(&self) -> bool {
        self.review_shortfall > 0
    }

    pub fn total_words(&self) -> usize {
        self.review_words.len() + self.new_word_count
    }
}

/// Select review words and a new-word budget for the next story
pub fn select_vocabulary(
    store: &WordRecordStore,
    target_story_word_count: usize,
    new_word_ratio: f64,
    thresholds: &MasteryThresholds,
) -> Result<VocabularyConstraint> {
    if target_story_word_count == 0 {
        return Err(SproutError::InvalidInput(
            "target story word count must be positive".into(),
        ));
    }
    if !(0.0..=1.0).contains(&new_word_ratio) {
        return Err(SproutError::InvalidInput(format!(
            "new word ratio {} outside [0, 1]",
            new_word_ratio
        )));
    }

    // epsilon keeps 0.29 * 100 at 29 instead of 28.999..
    let new_budget = (target_story_word_count as f64 * new_word_ratio + 1e-9).floor() as usize;
    let review_budget = target_story_word_count - new_budget.min(target_story_word_count);

    let mut candidates: Vec<(MasteryCategory, &WordRecord)> = store
        .all()
        .map(|r| (r.mastery(thresholds), r))
        .filter(|(category, _)| category.is_reviewable())
        .collect();

    let rank = |c: &MasteryCategory| REVIEW_PRIORITY.iter().position(|p| p == c);
    candidates.sort_by(|(ca, a), (cb, b)| {
        rank(ca)
            .cmp(&rank(cb))
            .then_with(|| a.last_seen_session.cmp(&b.last_seen_session))
            .then_with(|| a.word.cmp(&b.word))
    });

    let review_words: BTreeSet<String> = candidates
        .into_iter()
        .take(review_budget)
        .map(|(_, r)| r.word.clone())
        .collect();

    let review_shortfall = review_budget - review_words.len();
    let constraint = VocabularyConstraint {
        new_word_count: target_story_word_count - review_words.len(),
        review_words,
        review_shortfall,
    };

    if constraint.is_under_filled() {
        tracing::debug!(
            shortfall = review_shortfall,
            known_words = store.len(),
            "review budget under-filled, padding with new words"
        );
    }
    tracing::debug!(
        review = constraint.review_words.len(),
        new = constraint.new_word_count,
        "selected story vocabulary"
    );

    Ok(constraint)
}

/// Select using the configured target length and ratio
pub fn select_with_config(
    store: &WordRecordStore,
    config: &LearningConfig,
) -> Result<VocabularyConstraint> {
    select_vocabulary(
        store,
        config.selection.target_story_word_count,
        config.selection.new_word_ratio,
        &config.mastery,
    )
}
