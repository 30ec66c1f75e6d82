//! Parse story writer output into a structured outline
//!
//! Writers are asked for bare JSON but often wrap it in prose or markdown
//! fences. The outermost JSON object is extracted before deserializing.

use crate::core::error::{Result, SproutError};
use crate::core::{normalize_text_token, ReadingLevel};
use crate::session::page_words;
use crate::vocab::{VocabularyConstraint, WordRecordStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One page of a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPage {
    pub page_number: u32,
    pub text: String,
    #[serde(default)]
    pub key_words: Vec<String>,
    #[serde(default)]
    pub illustration_prompt: String,
}

/// A story as returned by the writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryOutline {
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub reading_level: ReadingLevel,
    pub pages: Vec<StoryPage>,
}

/// How a story measured up against the constraint it was written for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintCheck {
    /// Story words the learner has never read, sorted
    pub new_words: Vec<String>,
    /// Review words that actually appear in the story
    pub review_words_used: BTreeSet<String>,
    pub new_word_budget: usize,
}

impl ConstraintCheck {
    pub fn over_budget(&self) -> bool {
        self.new_words.len() > self.new_word_budget
    }
}

impl StoryOutline {
    /// Distinct normalized words across all pages, sorted
    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.pages
            .iter()
            .flat_map(|p| page_words(&p.text))
            .collect()
    }

    pub fn page(&self, index: usize) -> Option<&StoryPage> {
        self.pages.get(index)
    }

    /// Compare the story's words with the learner's history and the constraint
    pub fn check_against(
        &self,
        constraint: &VocabularyConstraint,
        store: &WordRecordStore,
    ) -> ConstraintCheck {
        let vocabulary = self.vocabulary();
        let new_words: Vec<String> = vocabulary
            .iter()
            .filter(|w| !store.contains(w))
            .cloned()
            .collect();
        let review_words_used = constraint
            .review_words
            .intersection(&vocabulary)
            .cloned()
            .collect();

        let check = ConstraintCheck {
            new_words,
            review_words_used,
            new_word_budget: constraint.new_word_count,
        };
        if check.over_budget() {
            tracing::warn!(
                title = %self.title,
                new_words = check.new_words.len(),
                budget = check.new_word_budget,
                "story introduces more new words than allowed"
            );
        }
        check
    }
}

/// Parse a writer response into an outline
pub fn parse_outline(response: &str) -> Result<StoryOutline> {
    let json_str = extract_json(response)?;

    let mut outline: StoryOutline = serde_json::from_str(json_str).map_err(|e| {
        SproutError::Story(format!(
            "Failed to parse story outline: {} - Response: {}",
            e, response
        ))
    })?;

    if outline.pages.is_empty() {
        return Err(SproutError::Story(format!(
            "story {:?} has no pages",
            outline.title
        )));
    }

    for page in &mut outline.pages {
        page.key_words = page
            .key_words
            .iter()
            .filter_map(|w| normalize_text_token(w).ok())
            .collect();
    }

    Ok(outline)
}

/// Extract JSON object from writer response (handles surrounding text)
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| SproutError::Story("No JSON found in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| SproutError::Story("No closing brace found in response".into()))?;
    if end < start {
        return Err(SproutError::Story("Malformed JSON in response".into()));
    }
    Ok(&response[start..=end])
}

/// System prompt describing the outline format
pub const STORY_SYSTEM_PROMPT: &str = r#"You write short picture-book stories for young children learning to read.
Follow the vocabulary requirements exactly. Repetition of key words is good practice.

OUTPUT FORMAT (JSON only, no explanation):
{
  "title": "Story Title",
  "theme": "the theme",
  "reading_level": "beginner|intermediate|advanced",
  "pages": [
    {
      "page_number": 1,
      "text": "Simple sentence here.",
      "key_words": ["word1", "word2"],
      "illustration_prompt": "Description of a child-friendly illustration for this page"
    }
  ]
}
"#;
