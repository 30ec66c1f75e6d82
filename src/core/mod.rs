pub mod config;
pub mod error;
pub mod types;

pub use config::{FluencyConfig, LearningConfig, MasteryThresholds, SelectionConfig};
pub use error::{Result, SproutError};
pub use types::{normalize_text_token, normalize_word, ReadingLevel, SessionId, UserView};
