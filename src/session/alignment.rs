//! Align a transcript with the page the child was reading
//!
//! Comparison is positional: the i-th word heard is scored against the i-th
//! word on the page. Page words beyond the end of the transcript count as
//! missed, transcript words beyond the end of the page are extra.
//!
//! Reading time for a page runs from the start of its recording (time 0)
//! to the end of the last word heard, so pauses and speech both count.

use crate::core::{normalize_text_token, SessionId};
use crate::session::events::{RecognizedWord, WordAttempt};
use serde::{Deserialize, Serialize};

/// A page word that was read as something else
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub expected: String,
    pub heard: String,
    pub position: usize,
}

/// Result of scoring one transcript against one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// One attempt per page word, in page order
    pub attempts: Vec<WordAttempt>,
    pub mismatches: Vec<Mismatch>,
    /// Page words never reached by the transcript
    pub missed: Vec<String>,
    /// Heard after the page ran out
    pub extra_words: Vec<String>,
    /// Elapsed time from the start of the recording to the last word heard
    pub reading_time_ms: u64,
}

impl Alignment {
    pub fn correct_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.correct).count()
    }

    pub fn total_words(&self) -> usize {
        self.attempts.len()
    }

    /// Page words the child actually got to, right or wrong
    pub fn words_read(&self) -> usize {
        self.attempts.iter().filter(|a| !a.skipped).count()
    }
}

/// Split page text into normalized words, dropping non-word tokens
pub fn page_words(page_text: &str) -> Vec<String> {
    page_text
        .split_whitespace()
        .filter_map(|t| normalize_text_token(t).ok())
        .collect()
}

/// Score `recognized` against `page_text` and emit attempt events
pub fn align_transcript(
    page_text: &str,
    recognized: &[RecognizedWord],
    session_id: &SessionId,
) -> Alignment {
    let target = page_words(page_text);
    let mut alignment = Alignment::default();
    let mut previous_end: u64 = 0;

    for (position, expected) in target.iter().enumerate() {
        let Some(spoken) = recognized.get(position) else {
            alignment.missed.push(expected.clone());
            alignment
                .attempts
                .push(WordAttempt::skipped(expected.clone(), session_id.clone()));
            continue;
        };

        let latency_ms = spoken.start_ms.saturating_sub(previous_end);
        previous_end = spoken.end_ms;

        let heard = normalize_text_token(&spoken.text).unwrap_or_else(|_| spoken.text.trim().to_lowercase());
        let correct = &heard == expected;
        if !correct {
            alignment.mismatches.push(Mismatch {
                expected: expected.clone(),
                heard,
                position,
            });
        }

        alignment.attempts.push(WordAttempt::read(
            expected.clone(),
            correct,
            latency_ms,
            session_id.clone(),
        ));
    }

    alignment.extra_words = recognized
        .iter()
        .skip(target.len())
        .map(|w| w.text.trim().to_lowercase())
        .collect();
    alignment.reading_time_ms = recognized.iter().map(|w| w.end_ms).max().unwrap_or(0);

    tracing::debug!(
        words = alignment.total_words(),
        correct = alignment.correct_count(),
        missed = alignment.missed.len(),
        extra = alignment.extra_words.len(),
        reading_time_ms = alignment.reading_time_ms,
        "aligned transcript"
    );

    alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(heard: &[(&str, u64, u64)]) -> Vec<RecognizedWord> {
        heard
            .iter()
            .map(|(t, s, e)| RecognizedWord::new(*t, *s, *e))
            .collect()
    }

    #[test]
    fn test_page_words_strip_punctuation() {
        assert_eq!(
            page_words("The cat sat. \"Run, dog!\" - 3"),
            vec!["the", "cat", "sat", "run", "dog"]
        );
    }

    #[test]
    fn test_perfect_reading() {
        let session = SessionId::from("s1");
        let heard = words(&[("the", 500, 700), ("cat", 900, 1200), ("sat", 1300, 1600)]);
        let alignment = align_transcript("The cat sat.", &heard, &session);

        assert_eq!(alignment.correct_count(), 3);
        assert!(alignment.mismatches.is_empty());
        let latencies: Vec<u64> = alignment.attempts.iter().map(|a| a.latency_ms).collect();
        assert_eq!(latencies, vec![500, 200, 100]);
    }

    #[test]
    fn test_mismatch_records_what_was_heard() {
        let session = SessionId::from("s1");
        let heard = words(&[("the", 0, 100), ("hat", 200, 300)]);
        let alignment = align_transcript("the cat", &heard, &session);

        assert_eq!(alignment.correct_count(), 1);
        assert_eq!(
            alignment.mismatches,
            vec![Mismatch {
                expected: "cat".into(),
                heard: "hat".into(),
                position: 1
            }]
        );
    }

    #[test]
    fn test_short_transcript_misses_words() {
        let session = SessionId::from("s1");
        let heard = words(&[("big", 0, 100)]);
        let alignment = align_transcript("big red sun", &heard, &session);

        assert_eq!(alignment.total_words(), 3);
        assert_eq!(alignment.missed, vec!["red", "sun"]);
        assert_eq!(alignment.words_read(), 1);
        assert!(alignment.attempts[1..]
            .iter()
            .all(|a| a.skipped && !a.correct && a.latency_ms == 0));
        assert_eq!(alignment.reading_time_ms, 100);
    }

    #[test]
    fn test_back_to_back_words_still_take_time() {
        let session = SessionId::from("s1");
        let heard = words(&[
            ("we", 0, 1000),
            ("can", 1000, 2000),
            ("see", 2000, 3000),
            ("the", 3000, 4000),
            ("big", 4000, 5000),
            ("sun", 5000, 6000),
        ]);
        let alignment = align_transcript("We can see the big sun.", &heard, &session);

        assert_eq!(alignment.correct_count(), 6);
        assert!(alignment.attempts.iter().all(|a| a.latency_ms == 0));
        assert_eq!(alignment.reading_time_ms, 6000);
    }

    #[test]
    fn test_reading_time_includes_the_wait_before_the_first_word() {
        let session = SessionId::from("s1");
        let heard = words(&[("one", 3000, 3500)]);
        let alignment = align_transcript("one two three four", &heard, &session);
        assert_eq!(alignment.reading_time_ms, 3500);
        assert_eq!(alignment.attempts[0].latency_ms, 3000);
    }

    #[test]
    fn test_empty_transcript_has_no_reading_time() {
        let alignment = align_transcript("a cat", &[], &SessionId::from("s1"));
        assert_eq!(alignment.reading_time_ms, 0);
        assert_eq!(alignment.words_read(), 0);
        assert_eq!(alignment.missed, vec!["a", "cat"]);
    }

    #[test]
    fn test_long_transcript_has_extras() {
        let session = SessionId::from("s1");
        let heard = words(&[("run", 0, 100), ("run", 150, 250), ("Fast", 300, 400)]);
        let alignment = align_transcript("run", &heard, &session);

        assert_eq!(alignment.correct_count(), 1);
        assert_eq!(alignment.extra_words, vec!["run", "fast"]);
        assert_eq!(alignment.reading_time_ms, 400);
    }

    #[test]
    fn test_overlapping_timestamps_do_not_underflow() {
        let session = SessionId::from("s1");
        let heard = words(&[("a", 0, 500), ("dog", 400, 800)]);
        let alignment = align_transcript("a dog", &heard, &session);
        assert_eq!(alignment.attempts[1].latency_ms, 0);
        assert_eq!(alignment.reading_time_ms, 800);
    }
}
