//! Build story requests for the story writer
//!
//! The request carries everything the writer needs to honour the learner's
//! vocabulary constraint: the review words to weave in, the new-word budget,
//! and level-appropriate starter words the child has not met yet.

use crate::core::ReadingLevel;
use crate::vocab::{VocabularyConstraint, WordRecordStore};
use serde::{Deserialize, Serialize};

/// Default number of pages in a generated story
pub const DEFAULT_PAGE_COUNT: usize = 15;

/// Cap on suggested new words listed in the prompt
const MAX_SUGGESTIONS: usize = 10;

/// Everything the story writer is told about the next story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRequest {
    pub level: ReadingLevel,
    pub theme: String,
    pub page_count: usize,
    pub constraint: VocabularyConstraint,
    /// Starter words for the level the child has never read
    pub suggested_new_words: Vec<String>,
}

impl StoryRequest {
    pub fn new(
        level: ReadingLevel,
        theme: impl Into<String>,
        constraint: VocabularyConstraint,
        store: &WordRecordStore,
    ) -> Self {
        let suggested_new_words = level
            .starter_words()
            .iter()
            .filter(|w| !store.contains(w) && !constraint.review_words.contains(**w))
            .take(MAX_SUGGESTIONS.min(constraint.new_word_count))
            .map(|w| w.to_string())
            .collect();

        Self {
            level,
            theme: theme.into(),
            page_count: DEFAULT_PAGE_COUNT,
            constraint,
            suggested_new_words,
        }
    }

    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }

    /// User prompt for the story writer
    pub fn prompt(&self) -> String {
        build_story_prompt(self)
    }
}

/// Render a request as the writer's user prompt
pub fn build_story_prompt(request: &StoryRequest) -> String {
    let mut lines = vec![
        format!(
            "Create a short story outline for a 5-year-old child at {} reading level.",
            request.level
        ),
        String::new(),
        "Requirements:".to_string(),
        format!("- Theme: {}", request.theme),
        format!("- Story should be about {} pages long", request.page_count),
        "- Each page should have 1-2 simple sentences".to_string(),
    ];

    let constraint = &request.constraint;
    if constraint.review_words.is_empty() {
        lines.push("- This is the child's first story: every word is new to them".to_string());
    } else {
        let review: Vec<&str> = constraint.review_words.iter().map(String::as_str).collect();
        lines.push(format!(
            "- Reuse these practice words, repeating the harder ones: {}",
            review.join(", ")
        ));
    }

    lines.push(format!(
        "- Introduce at most {} words the child has not read before",
        constraint.new_word_count
    ));
    if !request.suggested_new_words.is_empty() {
        lines.push(format!(
            "- Good new words to choose from: {}",
            request.suggested_new_words.join(", ")
        ));
    }
    lines.push("- Make it engaging and fun".to_string());

    lines.join("\n")
}
