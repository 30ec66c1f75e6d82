//! Seam to the story and illustration collaborators
//!
//! The crate never talks to a model itself. It builds the request, hands it
//! to a `StoryWriter`, and checks what comes back against the constraint.

pub mod context;
pub mod parser;

pub use context::{build_story_prompt, StoryRequest, DEFAULT_PAGE_COUNT};
pub use parser::{parse_outline, ConstraintCheck, StoryOutline, StoryPage, STORY_SYSTEM_PROMPT};

use crate::core::Result;

/// Anything that can turn a story request into an outline
pub trait StoryWriter {
    fn write_story(&self, request: &StoryRequest) -> Result<StoryOutline>;
}

/// Brief for the illustration collaborator for one page
pub fn illustration_prompt(page: &StoryPage) -> String {
    format!(
        "Create a child-friendly, colorful illustration for a children's book page.\n\
         \n\
         Scene: {}\n\
         \n\
         Style requirements:\n\
         - Bright, cheerful colors\n\
         - Simple, clear shapes\n\
         - Cute, friendly characters\n\
         - Safe, age-appropriate content\n\
         - Storybook illustration style\n\
         - No text or words in the image\n\
         - Suitable for 5-year-old children",
        page.illustration_prompt.trim()
    )
}
