//! Per-session analysis and recommendations

use crate::core::{MasteryThresholds, ReadingLevel};
use crate::session::SessionSummary;
use crate::vocab::{MasteryCategory, WordRecordStore};
use serde::{Deserialize, Serialize};

/// Below this accuracy a LEARNING word still counts as needing practice
pub const PRACTICE_ACCURACY: f64 = 0.7;

/// More words needing practice than this triggers a targeted recommendation
const SESSION_PRACTICE_LIMIT: usize = 5;

/// How the words touched in one session stand after it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordAnalysis {
    pub words_attempted: usize,
    pub words_mastered: usize,
    pub words_needing_practice: usize,
    /// Mean lifetime accuracy of the touched words (0..=1)
    pub average_accuracy: f64,
}

/// Analysis of a finished reading session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalysis {
    pub summary: SessionSummary,
    pub reading_level: ReadingLevel,
    pub word_analysis: WordAnalysis,
    pub recommendations: Vec<String>,
}

/// Does this word still need practice?
pub(crate) fn needs_practice(category: MasteryCategory, accuracy: f64) -> bool {
    match category {
        MasteryCategory::Tricky => true,
        MasteryCategory::Learning => accuracy < PRACTICE_ACCURACY,
        MasteryCategory::New | MasteryCategory::Mastered => false,
    }
}

impl SessionAnalysis {
    pub fn new(
        summary: SessionSummary,
        reading_level: ReadingLevel,
        store: &WordRecordStore,
        thresholds: &MasteryThresholds,
    ) -> Self {
        let word_analysis = analyze_words(&summary, store, thresholds);
        let recommendations = session_recommendations(&summary, &word_analysis);
        Self {
            summary,
            reading_level,
            word_analysis,
            recommendations,
        }
    }
}

fn analyze_words(
    summary: &SessionSummary,
    store: &WordRecordStore,
    thresholds: &MasteryThresholds,
) -> WordAnalysis {
    let touched: Vec<_> = store
        .all()
        .filter(|r| r.last_seen_session == summary.session_id)
        .collect();

    if touched.is_empty() {
        return WordAnalysis::default();
    }

    let mut analysis = WordAnalysis {
        words_attempted: touched.len(),
        ..Default::default()
    };
    let mut accuracy_sum = 0.0;
    for record in &touched {
        let category = record.mastery(thresholds);
        if category == MasteryCategory::Mastered {
            analysis.words_mastered += 1;
        }
        if needs_practice(category, record.accuracy()) {
            analysis.words_needing_practice += 1;
        }
        accuracy_sum += record.accuracy();
    }
    analysis.average_accuracy = accuracy_sum / touched.len() as f64;
    analysis
}

fn session_recommendations(summary: &SessionSummary, words: &WordAnalysis) -> Vec<String> {
    let mut recommendations = Vec::new();

    let accuracy = summary.accuracy_ratio;
    if accuracy < 0.70 {
        recommendations.push("Focus on word recognition and phonics practice".to_string());
    } else if accuracy < 0.85 {
        recommendations.push("Continue practicing challenging words".to_string());
    } else {
        recommendations.push("Great accuracy! Ready for more complex texts".to_string());
    }

    let wpm = summary.words_per_minute;
    if wpm < 20.0 {
        recommendations.push("Practice reading aloud to improve speed".to_string());
    } else if wpm > 50.0 {
        recommendations.push("Excellent reading speed! Focus on comprehension".to_string());
    }

    let fluency = summary.fluency_score;
    if fluency < 60.0 {
        recommendations.push("Practice reading with expression and rhythm".to_string());
    } else if fluency < 80.0 {
        recommendations.push("Good fluency! Continue regular practice".to_string());
    }

    if words.words_needing_practice > SESSION_PRACTICE_LIMIT {
        recommendations.push(format!(
            "Focus on practicing {} words that need more work",
            words.words_needing_practice
        ));
    }

    recommendations
}
