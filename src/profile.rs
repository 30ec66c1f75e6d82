//! Learner profile: the single owner of a child's learning state

use crate::core::{LearningConfig, ReadingLevel, Result, SessionId, SproutError};
use crate::report::{ParentReport, ProgressHistory, Rewards, SessionAnalysis, WordMasteryReport};
use crate::session::{align_transcript, Alignment, ReadingSession, RecognizedWord};
use crate::story::{ConstraintCheck, StoryOutline, StoryRequest, StoryWriter};
use crate::vocab::{select_with_config, WordRecordStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything tracked for one child
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub name: String,
    pub level: ReadingLevel,
    pub words: WordRecordStore,
    #[serde(default)]
    pub progress: ProgressHistory,
    #[serde(default)]
    pub rewards: Rewards,
}

/// Result of reading one page aloud
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub alignment: Alignment,
    /// Page words counted in the session, skipped ones included
    pub words_recorded: usize,
}

/// A story produced for a request, with how well it kept to the constraint
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStory {
    pub request: StoryRequest,
    pub outline: StoryOutline,
    pub check: ConstraintCheck,
}

impl PlannedStory {
    /// The story introduces more new words than the constraint allowed
    pub fn over_budget(&self) -> bool {
        self.check.over_budget()
    }
}

impl LearnerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Work out what the next story should contain
    pub fn plan_story(&self, theme: &str, config: &LearningConfig) -> Result<StoryRequest> {
        let constraint = select_with_config(&self.words, config)?;
        Ok(StoryRequest::new(self.level, theme, constraint, &self.words))
    }

    /// Plan a story and have `writer` produce it
    pub fn next_story(
        &self,
        writer: &dyn StoryWriter,
        theme: &str,
        config: &LearningConfig,
    ) -> Result<PlannedStory> {
        let request = self.plan_story(theme, config)?;
        let outline = writer.write_story(&request)?;
        let check = outline.check_against(&request.constraint, &self.words);
        tracing::info!(
            title = %outline.title,
            pages = outline.pages.len(),
            new_words = check.new_words.len(),
            "story ready"
        );
        Ok(PlannedStory {
            request,
            outline,
            check,
        })
    }

    pub fn begin_session(&self, session_id: SessionId) -> ReadingSession {
        ReadingSession::begin(session_id)
    }

    /// Score a transcript against a page and feed it to the session
    ///
    /// Each page's timestamps start at zero, so time spent turning pages
    /// never reaches the session.
    pub fn read_page(
        &mut self,
        session: &mut ReadingSession,
        page_text: &str,
        recognized: &[RecognizedWord],
    ) -> Result<PageResult> {
        let alignment = align_transcript(page_text, recognized, session.session_id());
        let words_recorded = session.apply_alignment(&mut self.words, &alignment)?;
        Ok(PageResult {
            alignment,
            words_recorded,
        })
    }

    /// Finish a session, analyse it and update progress, rewards and level
    pub fn complete_session(
        &mut self,
        session: &mut ReadingSession,
        config: &LearningConfig,
    ) -> Result<SessionAnalysis> {
        let summary = session.finish(&config.fluency)?;
        let analysis = SessionAnalysis::new(summary, self.level, &self.words, &config.mastery);

        self.progress.record(&analysis);
        let stars = self.rewards.award(analysis.summary.accuracy_ratio);

        let level = self.progress.estimate_reading_level();
        if level != self.level {
            tracing::info!(from = %self.level, to = %level, "reading level changed");
            self.level = level;
        }
        tracing::debug!(stars, total = self.rewards.stars, "stars awarded");

        Ok(analysis)
    }

    pub fn word_report(&self, config: &LearningConfig) -> WordMasteryReport {
        WordMasteryReport::build(&self.words, &config.mastery)
    }

    pub fn parent_report(&self, config: &LearningConfig) -> Option<ParentReport> {
        ParentReport::build(&self.progress, &self.words, &config.mastery)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A profile shared across request handlers
///
/// One lock per learner; handlers for different children never contend.
#[derive(Debug, Clone, Default)]
pub struct SharedProfile(Arc<Mutex<LearnerProfile>>);

impl SharedProfile {
    pub fn new(profile: LearnerProfile) -> Self {
        Self(Arc::new(Mutex::new(profile)))
    }

    /// Exclusive access to the profile
    pub fn lock(&self) -> Result<MutexGuard<'_, LearnerProfile>> {
        self.0
            .lock()
            .map_err(|_| SproutError::InvalidState("learner profile lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::StoryPage;
    use std::collections::BTreeSet;
    use std::thread;

    struct CannedWriter(&'static str);

    impl StoryWriter for CannedWriter {
        fn write_story(&self, request: &StoryRequest) -> Result<StoryOutline> {
            Ok(StoryOutline {
                title: "The Red Hat".into(),
                theme: request.theme.clone(),
                reading_level: request.level,
                pages: vec![StoryPage {
                    page_number: 1,
                    text: self.0.into(),
                    key_words: vec!["hat".into()],
                    illustration_prompt: "A cat in a red hat".into(),
                }],
            })
        }
    }

    #[test]
    fn test_next_story_uses_writer() {
        let profile = LearnerProfile::new("Mia");
        let story = profile
            .next_story(
                &CannedWriter("The cat has a red hat."),
                "hats",
                &LearningConfig::default(),
            )
            .unwrap();
        assert_eq!(story.request.constraint.new_word_count, 20);
        assert_eq!(story.outline.theme, "hats");
        assert_eq!(story.check.new_words.len(), 6);
        assert!(!story.over_budget());
    }

    #[test]
    fn test_next_story_reports_broken_constraint() {
        let mut config = LearningConfig::default();
        config.selection.target_story_word_count = 4;
        config.selection.new_word_ratio = 0.5;

        let mut profile = LearnerProfile::new("Mia");
        for word in ["the", "cat"] {
            profile.words.record_attempt(word, &"s0".into(), true).unwrap();
        }

        let story = profile
            .next_story(&CannedWriter("The cat has a red hat."), "hats", &config)
            .unwrap();
        assert_eq!(story.request.constraint.new_word_count, 2);
        assert_eq!(story.check.new_words, vec!["a", "has", "hat", "red"]);
        assert!(story.over_budget());
        assert_eq!(
            story.check.review_words_used,
            BTreeSet::from(["cat".to_string(), "the".to_string()])
        );
    }

    #[test]
    fn test_reading_a_page_updates_words_and_rewards() {
        let config = LearningConfig::default();
        let mut profile = LearnerProfile::new("Mia");
        let mut session = profile.begin_session("s1".into());

        let heard = vec![
            RecognizedWord::new("the", 0, 300),
            RecognizedWord::new("cat", 600, 900),
            RecognizedWord::new("has", 1200, 1500),
            RecognizedWord::new("a", 1800, 1900),
            RecognizedWord::new("bed", 2400, 2700),
            RecognizedWord::new("hat", 3000, 3300),
        ];
        let page = profile
            .read_page(&mut session, "The cat has a red hat.", &heard)
            .unwrap();
        assert_eq!(page.words_recorded, 6);
        assert_eq!(page.alignment.correct_count(), 5);

        assert_eq!(page.alignment.reading_time_ms, 3300);

        let analysis = profile.complete_session(&mut session, &config).unwrap();
        assert_eq!(analysis.summary.words_attempted, 6);
        assert_eq!(analysis.summary.reading_time_ms, 3300);
        assert_eq!(analysis.summary.new_words_introduced.len(), 6);
        assert_eq!(profile.words.len(), 6);
        assert_eq!(profile.progress.len(), 1);
        assert_eq!(profile.rewards.stars, 8);
        assert_eq!(profile.rewards.streak, 1);

        assert!(profile.complete_session(&mut session, &config).is_err());
        assert_eq!(profile.progress.len(), 1);
    }

    #[test]
    fn test_cut_off_transcript_leaves_unread_words_alone() {
        let config = LearningConfig::default();
        let mut profile = LearnerProfile::new("Mia");
        for n in 0..3 {
            let mut session = profile.begin_session(SessionId::from(format!("s{}", n).as_str()));
            let heard = [
                RecognizedWord::new("red", 0, 400),
                RecognizedWord::new("hat", 500, 900),
            ];
            profile.read_page(&mut session, "red hat", &heard).unwrap();
            profile.complete_session(&mut session, &config).unwrap();
        }
        let before = profile.words.get("hat").cloned();

        let mut session = profile.begin_session("s3".into());
        let heard = [RecognizedWord::new("red", 0, 400)];
        let page = profile.read_page(&mut session, "red hat", &heard).unwrap();
        assert_eq!(page.alignment.missed, vec!["hat"]);
        assert_eq!(page.words_recorded, 2);

        let analysis = profile.complete_session(&mut session, &config).unwrap();
        assert_eq!(profile.words.get("hat").cloned(), before);
        assert_eq!(
            profile.words.get("hat").unwrap().mastery(&config.mastery),
            crate::vocab::MasteryCategory::Mastered
        );
        assert!((analysis.summary.accuracy_ratio - 0.5).abs() < 1e-9);
        assert_eq!(analysis.summary.skipped_words, vec!["hat"]);
    }

    #[test]
    fn test_profile_json_round_trip() {
        let mut profile = LearnerProfile::new("Leo");
        profile
            .words
            .record_attempt("sun", &"s1".into(), true)
            .unwrap();
        let restored = LearnerProfile::from_json(&profile.to_json().unwrap()).unwrap();
        assert_eq!(restored, profile);
    }

    #[test]
    fn test_shared_profile_serializes_writers() {
        let shared = SharedProfile::new(LearnerProfile::new("Ava"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let session = SessionId::from(format!("s{}", i).as_str());
                    for _ in 0..25 {
                        let mut profile = shared.lock().unwrap();
                        profile.words.record_attempt("fun", &session, true).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let profile = shared.lock().unwrap();
        let record = profile.words.get("fun").unwrap();
        assert_eq!(record.attempts, 100);
        assert_eq!(record.correct, 100);
    }
}
