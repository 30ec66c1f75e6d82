//! Story Sprout - adaptive word mastery for read-aloud stories

pub mod core;
pub mod profile;
pub mod report;
pub mod session;
pub mod story;
pub mod vocab;

pub use crate::core::{LearningConfig, Result, SessionId, SproutError};
pub use crate::profile::{LearnerProfile, PageResult, PlannedStory, SharedProfile};
