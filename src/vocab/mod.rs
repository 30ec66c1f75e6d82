//! Word-level learning state
//!
//! Each learner owns a store of word records. Categories are derived from
//! the records on demand, and story vocabulary is selected from them.

pub mod mastery;
pub mod record;
pub mod selector;
pub mod store;

pub use mastery::{classify, MasteryCategory};
pub use record::{WordRecord, WordStats};
pub use selector::{select_vocabulary, select_with_config, VocabularyConstraint};
pub use store::WordRecordStore;
