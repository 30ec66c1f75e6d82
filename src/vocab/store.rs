//! Per-learner word record storage

use crate::core::{normalize_word, Result, SessionId, SproutError};
use crate::vocab::record::{WordRecord, WordStats};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every word a learner has ever been asked to read
///
/// Mutation goes through `&mut self`, so one store has exactly one writer at
/// a time. Persisted as a JSON object keyed by word, sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, WordStats>", into = "BTreeMap<String, WordStats>")]
pub struct WordRecordStore {
    records: AHashMap<String, WordRecord>,
}

impl WordRecordStore {
    pub fn new() -> Self {
        Self {
            records: AHashMap::new(),
        }
    }

    /// Look up a word; invalid tokens and unknown words are simply absent
    pub fn get(&self, word: &str) -> Option<&WordRecord> {
        let key = normalize_word(word).ok()?;
        self.records.get(&key)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Create or update the record for `word`
    ///
    /// Rejects malformed tokens without touching the store.
    pub fn record_attempt(
        &mut self,
        word: &str,
        session: &SessionId,
        was_correct: bool,
    ) -> Result<&WordRecord> {
        let key = normalize_word(word).map_err(|e| {
            tracing::warn!(word, "rejected word attempt");
            e
        })?;

        let record = self
            .records
            .entry(key)
            .and_modify(|r| r.apply(session, was_correct))
            .or_insert_with_key(|k| WordRecord::first_attempt(k.clone(), session.clone(), was_correct));
        Ok(record)
    }

    /// Iterate over every record (no particular order)
    pub fn all(&self) -> impl Iterator<Item = &WordRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<BTreeMap<String, WordStats>> for WordRecordStore {
    type Error = SproutError;

    fn try_from(map: BTreeMap<String, WordStats>) -> Result<Self> {
        let mut records = AHashMap::with_capacity(map.len());
        for (raw, stats) in map {
            let word = normalize_word(&raw)?;
            let record = stats.into_record(word.clone());
            if !record.is_consistent() {
                return Err(SproutError::InvalidInput(format!(
                    "inconsistent counters for {:?}: attempts={} correct={} streak={}",
                    word, record.attempts, record.correct, record.consecutive_correct
                )));
            }
            if records.insert(word.clone(), record).is_some() {
                return Err(SproutError::InvalidInput(format!(
                    "duplicate word after normalization: {:?}",
                    word
                )));
            }
        }
        Ok(Self { records })
    }
}

impl From<WordRecordStore> for BTreeMap<String, WordStats> {
    fn from(store: WordRecordStore) -> Self {
        store
            .records
            .into_iter()
            .map(|(word, record)| {
                let stats = record.stats();
                (word, stats)
            })
            .collect()
    }
}
