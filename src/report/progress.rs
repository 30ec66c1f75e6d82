//! Progress over time and reading-level estimation

use crate::core::{ReadingLevel, SessionId};
use crate::report::analysis::SessionAnalysis;
use serde::{Deserialize, Serialize};

/// Sessions considered when estimating the current reading level
const LEVEL_WINDOW: usize = 5;

/// One data point per finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub session_id: SessionId,
    /// Unix milliseconds, when the session id carries a time
    #[serde(default)]
    pub recorded_at_ms: Option<u64>,
    pub accuracy: f64,
    pub words_per_minute: f64,
    pub fluency_score: f64,
    pub words_mastered: usize,
    pub words_needing_practice: usize,
}

impl From<&SessionAnalysis> for ProgressPoint {
    fn from(analysis: &SessionAnalysis) -> Self {
        Self {
            session_id: analysis.summary.session_id.clone(),
            recorded_at_ms: analysis.summary.session_id.recorded_at_ms(),
            accuracy: analysis.summary.accuracy_ratio,
            words_per_minute: analysis.summary.words_per_minute,
            fluency_score: analysis.summary.fluency_score,
            words_mastered: analysis.word_analysis.words_mastered,
            words_needing_practice: analysis.word_analysis.words_needing_practice,
        }
    }
}

/// Averages over a run of progress points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressAverages {
    pub accuracy: f64,
    pub words_per_minute: f64,
    pub fluency_score: f64,
}

/// Ordered history of a learner's sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressHistory {
    points: Vec<ProgressPoint>,
}

impl ProgressHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, analysis: &SessionAnalysis) {
        self.points.push(ProgressPoint::from(analysis));
    }

    pub fn push(&mut self, point: ProgressPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ProgressPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The last `n` points (fewer if the history is shorter)
    pub fn recent(&self, n: usize) -> &[ProgressPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Points recorded in `[from_ms, to_ms)`; points without a time are left out
    pub fn between(&self, from_ms: u64, to_ms: u64) -> impl Iterator<Item = &ProgressPoint> {
        self.points
            .iter()
            .filter(move |p| p.recorded_at_ms.is_some_and(|t| t >= from_ms && t < to_ms))
    }

    /// Averages over all points, None when empty
    pub fn averages(&self) -> Option<ProgressAverages> {
        averages(&self.points)
    }

    /// Estimate the reading level from the last few sessions
    pub fn estimate_reading_level(&self) -> ReadingLevel {
        let Some(avg) = averages(self.recent(LEVEL_WINDOW)) else {
            return ReadingLevel::Beginner;
        };

        if avg.accuracy >= 0.90 && avg.words_per_minute >= 40.0 && avg.fluency_score >= 80.0 {
            ReadingLevel::Advanced
        } else if avg.accuracy >= 0.80 && avg.words_per_minute >= 25.0 && avg.fluency_score >= 60.0
        {
            ReadingLevel::Intermediate
        } else {
            ReadingLevel::Beginner
        }
    }
}

pub fn averages(points: &[ProgressPoint]) -> Option<ProgressAverages> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(ProgressAverages::default(), |acc, p| ProgressAverages {
        accuracy: acc.accuracy + p.accuracy,
        words_per_minute: acc.words_per_minute + p.words_per_minute,
        fluency_score: acc.fluency_score + p.fluency_score,
    });
    Some(ProgressAverages {
        accuracy: sum.accuracy / n,
        words_per_minute: sum.words_per_minute / n,
        fluency_score: sum.fluency_score / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(accuracy: f64, wpm: f64, fluency: f64) -> ProgressPoint {
        ProgressPoint {
            session_id: SessionId::new(),
            recorded_at_ms: None,
            accuracy,
            words_per_minute: wpm,
            fluency_score: fluency,
            words_mastered: 0,
            words_needing_practice: 0,
        }
    }

    #[test]
    fn test_empty_history_is_beginner() {
        assert_eq!(ProgressHistory::new().estimate_reading_level(), ReadingLevel::Beginner);
    }

    #[test]
    fn test_advanced_reader() {
        let mut history = ProgressHistory::new();
        history.push(point(0.95, 45.0, 90.0));
        history.push(point(0.92, 42.0, 85.0));
        assert_eq!(history.estimate_reading_level(), ReadingLevel::Advanced);
    }

    #[test]
    fn test_intermediate_reader() {
        let mut history = ProgressHistory::new();
        history.push(point(0.85, 30.0, 70.0));
        assert_eq!(history.estimate_reading_level(), ReadingLevel::Intermediate);
    }

    #[test]
    fn test_only_recent_sessions_count() {
        let mut history = ProgressHistory::new();
        for _ in 0..10 {
            history.push(point(0.3, 5.0, 20.0));
        }
        for _ in 0..5 {
            history.push(point(0.95, 50.0, 95.0));
        }
        assert_eq!(history.recent(5).len(), 5);
        assert_eq!(history.estimate_reading_level(), ReadingLevel::Advanced);
    }

    #[test]
    fn test_points_are_dated_from_generated_ids() {
        use crate::core::{FluencyConfig, MasteryThresholds};
        use crate::report::SessionAnalysis;
        use crate::session::ReadingSession;
        use crate::vocab::WordRecordStore;

        let mut store = WordRecordStore::new();
        let id = SessionId::new();
        let mut session = ReadingSession::begin(id.clone());
        session.record_attempt(&mut store, "sun", true, 300).unwrap();
        let summary = session.finish(&FluencyConfig::default()).unwrap();
        let analysis = SessionAnalysis::new(
            summary,
            ReadingLevel::Beginner,
            &store,
            &MasteryThresholds::default(),
        );

        let mut history = ProgressHistory::new();
        history.record(&analysis);
        assert_eq!(history.points()[0].recorded_at_ms, id.recorded_at_ms());
        assert!(history.points()[0].recorded_at_ms.is_some());
    }

    #[test]
    fn test_window_by_time() {
        let mut history = ProgressHistory::new();
        for (t, acc) in [(Some(1_000), 0.5), (None, 0.6), (Some(5_000), 0.7), (Some(9_000), 0.8)] {
            let mut p = point(acc, 30.0, 70.0);
            p.recorded_at_ms = t;
            history.push(p);
        }

        let window: Vec<f64> = history.between(1_000, 9_000).map(|p| p.accuracy).collect();
        assert_eq!(window, vec![0.5, 0.7]);
        assert_eq!(history.between(10_000, 20_000).count(), 0);
    }

    #[test]
    fn test_points_without_time_still_load() {
        let json = r#"{"points": [{"session_id": "s1", "accuracy": 1.0,
            "words_per_minute": 30.0, "fluency_score": 90.0,
            "words_mastered": 2, "words_needing_practice": 0}]}"#;
        let history: ProgressHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.points()[0].recorded_at_ms, None);
    }

    #[test]
    fn test_averages() {
        let mut history = ProgressHistory::new();
        history.push(point(1.0, 20.0, 80.0));
        history.push(point(0.5, 40.0, 60.0));
        let avg = history.averages().unwrap();
        assert!((avg.accuracy - 0.75).abs() < 1e-9);
        assert!((avg.words_per_minute - 30.0).abs() < 1e-9);
        assert!((avg.fluency_score - 70.0).abs() < 1e-9);
    }
}
