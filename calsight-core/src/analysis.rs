//! Schedule analysis facade.
//!
//! `analyze_schedule` is the pure entry point; [`ScheduleAnalyzer`] adds the
//! event fetch in front of it for hosts that talk to a calendar backend.

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::advisor::{Suggestion, suggestions_in};
use crate::analysis_config::AnalysisConfig;
use crate::conflict::{Conflict, conflicts_in};
use crate::date_range::DateRange;
use crate::error::AnalysisResult;
use crate::event::Event;
use crate::interval::Timeline;
use crate::slots::{FreeSlot, SlotRequest, find_free_slots};
use crate::source::EventSource;

pub const NO_EVENTS_MESSAGE: &str = "No events found for optimization";
pub const COMPLETED_MESSAGE: &str = "Schedule optimization completed";
pub const DEGRADED_MESSAGE: &str = "Calendar backend unavailable; no events analyzed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Completed,
    NoEvents,
    /// The event source failed; the report is empty rather than an error.
    Degraded,
}

/// Conflicts and optimizations for one set of events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub message: String,
    pub status: ReportStatus,
    pub events_analyzed: usize,
    pub events_skipped: usize,
    pub conflicts_found: usize,
    pub conflicts: Vec<Conflict>,
    pub optimizations: Vec<Suggestion>,
}

impl ScheduleReport {
    pub fn no_events() -> Self {
        ScheduleReport {
            message: NO_EVENTS_MESSAGE.to_string(),
            status: ReportStatus::NoEvents,
            events_analyzed: 0,
            events_skipped: 0,
            conflicts_found: 0,
            conflicts: Vec::new(),
            optimizations: Vec::new(),
        }
    }

    pub fn degraded() -> Self {
        ScheduleReport {
            message: DEGRADED_MESSAGE.to_string(),
            status: ReportStatus::Degraded,
            ..Self::no_events()
        }
    }
}

/// Run conflict detection and the optimization advisor over the same events.
pub fn analyze_schedule(events: &[Event], config: &AnalysisConfig) -> ScheduleReport {
    if events.is_empty() {
        return ScheduleReport::no_events();
    }

    let timeline = Timeline::from_events(events);
    let conflicts = conflicts_in(&timeline);
    let optimizations = suggestions_in(&timeline, events, config);

    tracing::debug!(
        events = events.len(),
        skipped = timeline.skipped(),
        conflicts = conflicts.len(),
        optimizations = optimizations.len(),
        "schedule analyzed"
    );

    ScheduleReport {
        message: COMPLETED_MESSAGE.to_string(),
        status: ReportStatus::Completed,
        events_analyzed: events.len(),
        events_skipped: timeline.skipped(),
        conflicts_found: conflicts.len(),
        conflicts,
        optimizations,
    }
}

/// Conflict listing for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub events_analyzed: usize,
    pub conflicts_found: usize,
    pub conflicts: Vec<Conflict>,
}

/// Analysis bound to an event source.
pub struct ScheduleAnalyzer<S> {
    source: S,
    config: AnalysisConfig,
}

impl<S: EventSource> ScheduleAnalyzer<S> {
    pub fn new(source: S, config: AnalysisConfig) -> Self {
        ScheduleAnalyzer { source, config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Fetch events, turning source failures into an empty list.
    /// The flag is false when the source failed.
    pub async fn events(&self, user_id: &str, range: Option<&DateRange>) -> (Vec<Event>, bool) {
        match self.source.fetch_events(user_id, range).await {
            Ok(events) => (events, true),
            Err(e) => {
                tracing::error!(user_id, error = %e, "failed to fetch events");
                (Vec::new(), false)
            }
        }
    }

    pub async fn optimize(&self, user_id: &str, range: &DateRange) -> ScheduleReport {
        let (events, ok) = self.events(user_id, Some(range)).await;
        if !ok {
            return ScheduleReport::degraded();
        }
        analyze_schedule(&events, &self.config)
    }

    pub async fn conflicts(&self, user_id: &str, range: Option<&DateRange>) -> ConflictReport {
        let (events, _) = self.events(user_id, range).await;
        let timeline = Timeline::from_events(&events);
        let conflicts = conflicts_in(&timeline);

        ConflictReport {
            events_analyzed: events.len(),
            conflicts_found: conflicts.len(),
            conflicts,
        }
    }

    /// Free slots on `day`. Events are fetched for that whole day in `offset`.
    /// The duration is validated before anything is fetched.
    pub async fn suggest_times(
        &self,
        user_id: &str,
        duration_minutes: u32,
        day: NaiveDate,
        offset: FixedOffset,
    ) -> AnalysisResult<Vec<FreeSlot>> {
        self.config.check_duration(duration_minutes)?;

        let range = DateRange::for_day(day, offset)?;
        let (events, _) = self.events(user_id, Some(&range)).await;
        let request = SlotRequest::new(day, duration_minutes).with_offset(offset);

        find_free_slots(&events, &request, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::SuggestionKind;
    use crate::error::{AnalysisError, AnalysisResult};
    use crate::event::EventCategory;
    use crate::source::StaticSource;
    use crate::test_support::{day, event};
    use async_trait::async_trait;
    use chrono::Offset;

    struct FailingSource;

    #[async_trait]
    impl EventSource for FailingSource {
        async fn fetch_events(&self, _: &str, _: Option<&DateRange>) -> AnalysisResult<Vec<Event>> {
            Err(AnalysisError::EventSource("connection refused".into()))
        }
    }

    fn utc() -> FixedOffset {
        chrono::Utc.fix()
    }

    #[test]
    fn test_empty_events_short_circuit() {
        let report = analyze_schedule(&[], &AnalysisConfig::default());

        assert_eq!(report.status, ReportStatus::NoEvents);
        assert_eq!(report.message, NO_EVENTS_MESSAGE);
        assert_eq!(report.conflicts_found, 0);
        assert!(report.conflicts.is_empty());
        assert!(report.optimizations.is_empty());
    }

    #[test]
    fn test_report_merges_conflicts_and_optimizations() {
        let events = vec![
            event("A", 9, 0, 10, 0),
            event("B", 9, 30, 10, 30),
            event("C", 10, 35, 11, 0),
        ];

        let report = analyze_schedule(&events, &AnalysisConfig::default());

        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.events_analyzed, 3);
        assert_eq!(report.conflicts_found, 1);
        assert_eq!(report.optimizations.len(), 1);
        assert_eq!(report.optimizations[0].kind, SuggestionKind::BufferTime);
    }

    #[test]
    fn test_work_overload_without_conflicts() {
        let events: Vec<_> = (0..5)
            .map(|i| event(&format!("w{i}"), 9 + i, 0, 9 + i, 30).with_category(EventCategory::Work))
            .collect();

        let report = analyze_schedule(&events, &AnalysisConfig::default());

        assert_eq!(report.conflicts_found, 0);
        assert_eq!(report.optimizations.len(), 1);
        assert_eq!(report.optimizations[0].kind, SuggestionKind::BreakRecommendation);
    }

    #[test]
    fn test_report_counts_skipped_events() {
        let mut broken = event("X", 9, 0, 10, 0);
        broken.start_time = Some("yesterday".into());
        let events = vec![broken, event("A", 11, 0, 12, 0)];

        let report = analyze_schedule(&events, &AnalysisConfig::default());

        assert_eq!(report.events_analyzed, 2);
        assert_eq!(report.events_skipped, 1);
    }

    #[tokio::test]
    async fn test_analyzer_optimize_uses_source() {
        let source = StaticSource::from(vec![event("A", 9, 0, 10, 0), event("B", 9, 30, 10, 30)]);
        let analyzer = ScheduleAnalyzer::new(source, AnalysisConfig::default());
        let range = DateRange::from_args(Some("2025-03-20"), Some("2025-03-20")).unwrap();

        let report = analyzer.optimize("u1", &range).await;

        assert_eq!(report.conflicts_found, 1);
    }

    #[tokio::test]
    async fn test_source_failure_degrades() {
        let analyzer = ScheduleAnalyzer::new(FailingSource, AnalysisConfig::default());
        let range = DateRange::from_args(Some("2025-03-20"), Some("2025-03-20")).unwrap();

        let report = analyzer.optimize("u1", &range).await;
        assert_eq!(report.status, ReportStatus::Degraded);
        assert!(report.conflicts.is_empty());

        let conflicts = analyzer.conflicts("u1", None).await;
        assert_eq!(conflicts.events_analyzed, 0);

        let slots = analyzer.suggest_times("u1", 30, day(), utc()).await.unwrap();
        assert_eq!(slots.len(), 1);
    }

    #[tokio::test]
    async fn test_suggest_times_rejects_duration_first() {
        let analyzer = ScheduleAnalyzer::new(FailingSource, AnalysisConfig::default());

        let err = analyzer.suggest_times("u1", 500, day(), utc()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidDuration { .. }));
    }

    #[tokio::test]
    async fn test_suggest_times_only_sees_that_day() {
        let mut other_day = event("Tomorrow", 9, 0, 18, 0);
        other_day.start_time = Some("2025-03-21T09:00:00Z".into());
        other_day.end_time = Some("2025-03-21T18:00:00Z".into());
        let source = StaticSource::from(vec![other_day, event("Lunch", 12, 0, 13, 0)]);
        let analyzer = ScheduleAnalyzer::new(source, AnalysisConfig::default());

        let slots = analyzer.suggest_times("u1", 60, day(), utc()).await.unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].next_event_title.as_deref(), Some("Lunch"));
    }
}
