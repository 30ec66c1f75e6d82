//! Word mastery and parent reports

use crate::core::{MasteryThresholds, ReadingLevel};
use crate::report::analysis::needs_practice;
use crate::report::progress::{averages, ProgressHistory, ProgressPoint};
use crate::vocab::{MasteryCategory, WordRecordStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sessions used for the "recent performance" recommendations
const RECENT_WINDOW: usize = 3;

/// More words needing practice than this earns a recommendation
const PRACTICE_LIMIT: usize = 10;

/// Words grouped by mastery category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordMasteryReport {
    pub total_words: usize,
    /// Sorted word lists per category
    pub by_category: BTreeMap<MasteryCategory, Vec<String>>,
    /// TRICKY words plus low-accuracy LEARNING words, sorted
    pub needs_practice: Vec<String>,
}

impl WordMasteryReport {
    pub fn build(store: &WordRecordStore, thresholds: &MasteryThresholds) -> Self {
        let mut report = Self {
            total_words: store.len(),
            ..Default::default()
        };

        for record in store.all() {
            let category = record.mastery(thresholds);
            report
                .by_category
                .entry(category)
                .or_default()
                .push(record.word.clone());
            if needs_practice(category, record.accuracy()) {
                report.needs_practice.push(record.word.clone());
            }
        }

        for words in report.by_category.values_mut() {
            words.sort();
        }
        report.needs_practice.sort();
        report
    }

    pub fn count(&self, category: MasteryCategory) -> usize {
        self.by_category.get(&category).map_or(0, Vec::len)
    }

    pub fn words(&self, category: MasteryCategory) -> &[String] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Headline numbers for the parent view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_sessions: usize,
    pub current_reading_level: ReadingLevel,
    /// Percent, one decimal place
    pub average_accuracy: f64,
    pub average_speed: f64,
    pub average_fluency: f64,
}

/// Everything a parent sees about a learner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentReport {
    pub summary: ReportSummary,
    pub word_mastery: WordMasteryReport,
    pub recommendations: Vec<String>,
    /// Every session in order, for charting
    pub progress_over_time: Vec<ProgressPoint>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ParentReport {
    /// None until at least one session has been recorded
    pub fn build(
        history: &ProgressHistory,
        store: &WordRecordStore,
        thresholds: &MasteryThresholds,
    ) -> Option<Self> {
        let avg = history.averages()?;
        let word_mastery = WordMasteryReport::build(store, thresholds);

        let summary = ReportSummary {
            total_sessions: history.len(),
            current_reading_level: history.estimate_reading_level(),
            average_accuracy: round1(avg.accuracy * 100.0),
            average_speed: round1(avg.words_per_minute),
            average_fluency: round1(avg.fluency_score),
        };

        let recommendations = overall_recommendations(history, &word_mastery);
        Some(Self {
            summary,
            word_mastery,
            recommendations,
            progress_over_time: history.points().to_vec(),
        })
    }
}

/// Recommendations across the whole history
pub fn overall_recommendations(
    history: &ProgressHistory,
    words: &WordMasteryReport,
) -> Vec<String> {
    let Some(recent) = averages(history.recent(RECENT_WINDOW)) else {
        return vec!["Start with regular reading sessions to build a foundation".to_string()];
    };

    let mut recommendations = Vec::new();

    let total = history.len();
    if total < 5 {
        recommendations
            .push("Increase reading frequency to at least 3-4 sessions per week".to_string());
    } else if total < 10 {
        recommendations.push("Good reading frequency! Continue with regular practice".to_string());
    } else {
        recommendations
            .push("Excellent reading consistency! Consider more challenging texts".to_string());
    }

    if recent.accuracy < 0.75 {
        recommendations
            .push("Focus on accuracy over speed - practice difficult words".to_string());
    } else if recent.accuracy > 0.90 {
        recommendations.push("Excellent accuracy! Ready for more complex vocabulary".to_string());
    }

    if recent.words_per_minute < 20.0 {
        recommendations.push("Practice reading aloud to improve reading speed".to_string());
    } else if recent.words_per_minute > 45.0 {
        recommendations
            .push("Great reading speed! Focus on comprehension and expression".to_string());
    }

    if words.needs_practice.len() > PRACTICE_LIMIT {
        recommendations.push(format!(
            "Focus on practicing {} words that need more work",
            words.needs_practice.len()
        ));
    }

    recommendations
}
