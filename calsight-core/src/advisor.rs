//! Heuristic schedule optimization suggestions.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::analysis_config::{AnalysisConfig, MAX_BUFFER_MINUTES};
use crate::event::Event;
use crate::interval::{Interval, Timeline};
use crate::wording;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    BufferTime,
    BreakRecommendation,
}

/// Advisory output; carries no identity beyond the response it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub detail: String,
}

/// Where a finding came from, before any text is attached.
#[derive(Debug, Clone, Copy)]
pub enum Finding<'a> {
    /// Consecutive events separated by less than the buffer threshold.
    TightBuffer {
        current: Interval<'a>,
        next: Interval<'a>,
        gap: Duration,
    },
    /// More WORK events than the overload threshold.
    Overload { work_events: usize },
}

impl From<&Finding<'_>> for Suggestion {
    fn from(finding: &Finding<'_>) -> Self {
        match finding {
            Finding::TightBuffer { current, next, .. } => Suggestion {
                kind: SuggestionKind::BufferTime,
                message: wording::buffer_message(current.event, next.event),
                detail: wording::buffer_detail(),
            },
            Finding::Overload { work_events } => Suggestion {
                kind: SuggestionKind::BreakRecommendation,
                message: wording::overload_message(),
                detail: wording::overload_detail(*work_events),
            },
        }
    }
}

/// Buffer findings (in pair order) followed by at most one overload finding.
///
/// Overlapping pairs are not reported here; that is the conflict detector's job.
pub fn find_findings<'a>(
    timeline: &Timeline<'a>,
    events: &'a [Event],
    config: &AnalysisConfig,
) -> Vec<Finding<'a>> {
    // Clamped so an unvalidated config cannot overflow the Duration.
    let threshold = Duration::minutes(config.buffer_minutes.clamp(0, MAX_BUFFER_MINUTES));

    let mut findings: Vec<Finding<'a>> = timeline
        .adjacent_pairs()
        .filter_map(|(current, next)| {
            let gap = current.gap_to(next);
            (gap >= Duration::zero() && gap < threshold).then_some(Finding::TightBuffer {
                current: *current,
                next: *next,
                gap,
            })
        })
        .collect();

    let work_events = events.iter().filter(|e| e.is_work()).count();
    if work_events > config.overload_threshold {
        findings.push(Finding::Overload { work_events });
    }

    findings
}

/// Suggest buffer time and breaks for a set of events.
pub fn advise_optimizations(events: &[Event], config: &AnalysisConfig) -> Vec<Suggestion> {
    let timeline = Timeline::from_events(events);
    suggestions_in(&timeline, events, config)
}

pub(crate) fn suggestions_in(
    timeline: &Timeline<'_>,
    events: &[Event],
    config: &AnalysisConfig,
) -> Vec<Suggestion> {
    find_findings(timeline, events, config)
        .iter()
        .map(Suggestion::from)
        .collect()
}
