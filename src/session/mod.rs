//! Reading sessions: transcript alignment and progress aggregation

pub mod aggregator;
pub mod alignment;
pub mod events;

pub use aggregator::{ReadingSession, SessionState, SessionSummary};
pub use alignment::{align_transcript, page_words, Alignment, Mismatch};
pub use events::{RecognizedWord, WordAttempt};
