//! Session progress aggregation
//!
//! A `ReadingSession` is OPEN from `begin` until `finish`. While open it
//! forwards every attempt to the learner's word store and keeps its own
//! tally; `finish` closes it and produces a `SessionSummary`.
//!
//! Skipped words (never reached by the reading) lower session accuracy but
//! are not charged to the word store. Speed is words read over elapsed
//! reading time; per-word latency only feeds the average response latency.

use crate::core::{normalize_word, FluencyConfig, Result, SessionId, SproutError};
use crate::session::alignment::Alignment;
use crate::session::events::WordAttempt;
use crate::vocab::WordRecordStore;
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: f64 = 60_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Default)]
struct SessionTally {
    words_attempted: u32,
    words_read: u32,
    words_correct: u32,
    total_latency_ms: u64,
    reading_time_ms: u64,
    new_words: Vec<String>,
    missed_words: Vec<String>,
    skipped_words: Vec<String>,
}

/// Summary of one completed reading session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    /// Page words presented, including skipped ones
    pub words_attempted: u32,
    pub words_correct: u32,
    /// words_correct / words_attempted, 0 when nothing was attempted
    pub accuracy_ratio: f64,
    /// Mean latency over words actually read
    pub average_response_latency_ms: f64,
    /// Words read for the first time ever, in order of first appearance
    pub new_words_introduced: Vec<String>,
    /// Distinct words read incorrectly, in order of first miss
    pub missed_words: Vec<String>,
    /// Distinct words the reading never reached
    #[serde(default)]
    pub skipped_words: Vec<String>,
    /// Elapsed reading time summed over pages
    pub reading_time_ms: u64,
    /// Words read per minute of reading time
    pub words_per_minute: f64,
    /// 0-100, blends accuracy with speed relative to the target pace
    pub fluency_score: f64,
}

/// Handle for one reading session
#[derive(Debug, Clone)]
pub struct ReadingSession {
    session_id: SessionId,
    state: SessionState,
    tally: SessionTally,
}

impl ReadingSession {
    /// Open a session with all counters at zero
    pub fn begin(session_id: SessionId) -> Self {
        tracing::debug!(session = %session_id, "reading session opened");
        Self {
            session_id,
            state: SessionState::Open,
            tally: SessionTally::default(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(SproutError::InvalidState(format!(
                "session {} is closed",
                self.session_id
            ))),
        }
    }

    /// Record one attempt in the session tally and the learner's store
    pub fn record_attempt(
        &mut self,
        store: &mut WordRecordStore,
        word: &str,
        was_correct: bool,
        latency_ms: u64,
    ) -> Result<()> {
        self.ensure_open()?;
        let key = normalize_word(word)?;

        let is_new = !store.contains(&key);
        store.record_attempt(&key, &self.session_id, was_correct)?;

        let tally = &mut self.tally;
        tally.words_attempted += 1;
        tally.words_read += 1;
        tally.total_latency_ms += latency_ms;
        if was_correct {
            tally.words_correct += 1;
        } else if !tally.missed_words.contains(&key) {
            tally.missed_words.push(key.clone());
        }
        if is_new {
            tally.new_words.push(key);
        }
        Ok(())
    }

    /// Count a page word the reading never reached
    ///
    /// Lowers session accuracy only; the word's record is left as it was.
    pub fn record_skipped(&mut self, word: &str) -> Result<()> {
        self.ensure_open()?;
        let key = normalize_word(word)?;

        let tally = &mut self.tally;
        tally.words_attempted += 1;
        if !tally.skipped_words.contains(&key) {
            tally.skipped_words.push(key);
        }
        Ok(())
    }

    /// Add elapsed reading time for a page
    pub fn add_reading_time(&mut self, elapsed_ms: u64) -> Result<()> {
        self.ensure_open()?;
        self.tally.reading_time_ms = self.tally.reading_time_ms.saturating_add(elapsed_ms);
        Ok(())
    }

    /// Consume an inbound attempt event
    pub fn apply(&mut self, store: &mut WordRecordStore, attempt: &WordAttempt) -> Result<()> {
        self.ensure_open()?;
        if attempt.session_id != self.session_id {
            return Err(SproutError::InvalidInput(format!(
                "attempt for session {} sent to session {}",
                attempt.session_id, self.session_id
            )));
        }
        if attempt.skipped {
            return self.record_skipped(&attempt.word);
        }
        self.record_attempt(store, &attempt.word, attempt.correct, attempt.latency_ms)
    }

    /// Apply a batch of events, stopping at the first failure
    pub fn apply_all<'a>(
        &mut self,
        store: &mut WordRecordStore,
        attempts: impl IntoIterator<Item = &'a WordAttempt>,
    ) -> Result<usize> {
        let mut applied = 0;
        for attempt in attempts {
            self.apply(store, attempt)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Apply one aligned page: its attempts and its reading time
    pub fn apply_alignment(
        &mut self,
        store: &mut WordRecordStore,
        alignment: &Alignment,
    ) -> Result<usize> {
        let applied = self.apply_all(store, &alignment.attempts)?;
        self.add_reading_time(alignment.reading_time_ms)?;
        Ok(applied)
    }

    /// Close the session and compute its summary
    ///
    /// Fails with `InvalidState` if the session was already finished.
    pub fn finish(&mut self, fluency: &FluencyConfig) -> Result<SessionSummary> {
        self.ensure_open()?;
        self.state = SessionState::Closed;

        let tally = std::mem::take(&mut self.tally);
        let attempted = tally.words_attempted;
        let read = tally.words_read;

        let accuracy_ratio = if attempted == 0 {
            0.0
        } else {
            tally.words_correct as f64 / attempted as f64
        };
        let average_response_latency_ms = if read == 0 {
            0.0
        } else {
            tally.total_latency_ms as f64 / read as f64
        };

        let words_per_minute = if tally.reading_time_ms == 0 {
            0.0
        } else {
            read as f64 / (tally.reading_time_ms as f64 / MS_PER_MINUTE)
        };

        let fluency_score = if attempted == 0 || tally.reading_time_ms == 0 {
            0.0
        } else {
            let speed = (words_per_minute / fluency.target_words_per_minute).min(1.0);
            let weight = fluency.accuracy_weight;
            (accuracy_ratio * weight + speed * (1.0 - weight)) * 100.0
        };

        let summary = SessionSummary {
            session_id: self.session_id.clone(),
            words_attempted: attempted,
            words_correct: tally.words_correct,
            accuracy_ratio,
            average_response_latency_ms,
            new_words_introduced: tally.new_words,
            missed_words: tally.missed_words,
            skipped_words: tally.skipped_words,
            reading_time_ms: tally.reading_time_ms,
            words_per_minute,
            fluency_score,
        };

        tracing::info!(
            session = %summary.session_id,
            attempted = summary.words_attempted,
            correct = summary.words_correct,
            new_words = summary.new_words_introduced.len(),
            wpm = summary.words_per_minute,
            "reading session finished"
        );

        Ok(summary)
    }
}
