//! Assessment: session analysis, progress tracking and parent reports

pub mod analysis;
pub mod parent;
pub mod progress;
pub mod rewards;

pub use analysis::{SessionAnalysis, WordAnalysis};
pub use parent::{overall_recommendations, ParentReport, ReportSummary, WordMasteryReport};
pub use progress::{ProgressAverages, ProgressHistory, ProgressPoint};
pub use rewards::Rewards;
