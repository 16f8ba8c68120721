//! Conflict detection over start-ordered events.
//!
//! Only neighbours in start order are compared. An event that overlaps a
//! later, non-adjacent event (e.g. a long block spanning two short ones) is
//! reported against its immediate successor only.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::interval::{Interval, Timeline};
use crate::wording;

/// Two adjacent intervals where the first ends after the second starts.
#[derive(Debug, Clone, Copy)]
pub struct Overlap<'a> {
    pub current: Interval<'a>,
    pub next: Interval<'a>,
}

impl Overlap<'_> {
    /// Earliest time the later event could start without overlapping.
    pub fn free_at(&self) -> DateTime<FixedOffset> {
        self.current.end
    }
}

/// A detected scheduling conflict with resolution text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub conflicting_events: [Event; 2],
    pub resolution_suggestions: Vec<String>,
    pub recommended_action: String,
}

impl From<&Overlap<'_>> for Conflict {
    fn from(overlap: &Overlap<'_>) -> Self {
        let current = overlap.current.event;
        let next = overlap.next.event;

        Conflict {
            conflicting_events: [current.clone(), next.clone()],
            resolution_suggestions: vec![
                wording::shorten_current(current, next),
                wording::move_next(current, next),
                wording::make_virtual(current, next),
            ],
            recommended_action: wording::reschedule(next, overlap.free_at()),
        }
    }
}

/// Adjacent overlapping pairs, in sweep order.
pub fn find_overlaps<'a>(timeline: &Timeline<'a>) -> Vec<Overlap<'a>> {
    timeline
        .adjacent_pairs()
        .filter(|(current, next)| current.overlaps_next(next))
        .map(|(current, next)| Overlap {
            current: *current,
            next: *next,
        })
        .collect()
}

/// Detect conflicts between events that are neighbours in start order.
pub fn detect_conflicts(events: &[Event]) -> Vec<Conflict> {
    let timeline = Timeline::from_events(events);
    conflicts_in(&timeline)
}

pub(crate) fn conflicts_in(timeline: &Timeline<'_>) -> Vec<Conflict> {
    find_overlaps(timeline).iter().map(Conflict::from).collect()
}
