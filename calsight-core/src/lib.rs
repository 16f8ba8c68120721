//! Schedule analysis for calsight.
//!
//! This crate holds the analysis engine shared by the calsight CLI and server:
//! - `interval` normalizes events into start-ordered spans
//! - `conflict`, `advisor` and `slots` implement the three analyses
//! - `analysis` composes them into a single report
//! - `source` defines where events come from

pub mod advisor;
pub mod analysis;
pub mod analysis_config;
pub mod conflict;
pub mod date_range;
pub mod error;
pub mod event;
pub mod interval;
pub mod slots;
pub mod source;
pub mod wording;

#[cfg(test)]
mod test_support;

pub use advisor::{Suggestion, SuggestionKind, advise_optimizations};
pub use analysis::{ReportStatus, ScheduleAnalyzer, ScheduleReport, analyze_schedule};
pub use analysis_config::AnalysisConfig;
pub use conflict::{Conflict, detect_conflicts};
pub use date_range::DateRange;
pub use error::{AnalysisError, AnalysisResult};
pub use event::{Event, EventCategory, EventPriority};
pub use slots::{FreeSlot, SlotKind, SlotRequest, find_free_slots};
