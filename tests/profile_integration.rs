//! Integration tests for the learner profile across several stories

use story_sprout::core::{LearningConfig, ReadingLevel, Result, SessionId};
use story_sprout::session::RecognizedWord;
use story_sprout::story::{parse_outline, StoryOutline, StoryRequest, StoryWriter};
use story_sprout::vocab::MasteryCategory;
use story_sprout::LearnerProfile;

/// Writer that echoes a fixed JSON response through the real parser
struct JsonWriter(&'static str);

impl StoryWriter for JsonWriter {
    fn write_story(&self, _request: &StoryRequest) -> Result<StoryOutline> {
        parse_outline(self.0)
    }
}

const STORY: &str = r#"```json
{
  "title": "Pip Can Hop",
  "theme": "frogs",
  "reading_level": "beginner",
  "pages": [
    {"page_number": 1, "text": "Pip is a frog.", "key_words": ["frog"], "illustration_prompt": "A green frog"},
    {"page_number": 2, "text": "Pip can hop.", "key_words": ["hop"], "illustration_prompt": "A frog hopping"}
  ]
}
```"#;

/// Read every page perfectly at a steady pace
fn read_story(profile: &mut LearnerProfile, outline: &StoryOutline, id: &str, config: &LearningConfig) {
    let mut session = profile.begin_session(SessionId::from(id));
    for page in &outline.pages {
        let heard: Vec<RecognizedWord> = page
            .text
            .split_whitespace()
            .enumerate()
            .map(|(i, w)| {
                let start = i as u64 * 1_000 + 500;
                RecognizedWord::new(w.trim_end_matches('.'), start, start + 400)
            })
            .collect();
        profile.read_page(&mut session, &page.text, &heard).unwrap();
    }
    profile.complete_session(&mut session, config).unwrap();
}

#[test]
fn test_story_cycle_builds_mastery() {
    let config = LearningConfig::default();
    let mut profile = LearnerProfile::new("Pip's friend");
    let writer = JsonWriter(STORY);

    let story = profile.next_story(&writer, "frogs", &config).unwrap();
    assert!(story.request.constraint.review_words.is_empty());
    assert!(!story.over_budget());
    let outline = story.outline;
    assert_eq!(outline.vocabulary().len(), 6);

    for n in 1..=3 {
        read_story(&mut profile, &outline, &format!("2024-06-0{}", n), &config);
    }

    let words = profile.word_report(&config);
    assert_eq!(words.count(MasteryCategory::Mastered), 6);
    assert!(words.needs_practice.is_empty());

    // Mastered words backfill review once nothing harder is left
    let story = profile.next_story(&writer, "frogs", &config).unwrap();
    assert_eq!(story.request.constraint.review_words.len(), 6);
    assert_eq!(story.request.constraint.new_word_count, 14);
    assert_eq!(story.check.review_words_used.len(), 6);
    assert!(story.check.new_words.is_empty());

    // 7 words over 3.9 s + 2.9 s of page recordings
    let last = profile.progress.points().last().unwrap();
    assert!((last.words_per_minute - 7.0 / 6.8 * 60.0).abs() < 1e-9);

    let report = profile.parent_report(&config).unwrap();
    assert_eq!(report.summary.total_sessions, 3);
    assert_eq!(report.summary.average_accuracy, 100.0);
    assert_eq!(profile.rewards.stars, 30);
    assert_eq!(profile.level, ReadingLevel::Advanced);
}

#[test]
fn test_parent_report_needs_a_session() {
    let profile = LearnerProfile::new("New reader");
    assert!(profile.parent_report(&LearningConfig::default()).is_none());
}
