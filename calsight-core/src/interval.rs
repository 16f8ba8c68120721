//! Interval model: events normalized to ordered time spans.

use chrono::{DateTime, Duration, FixedOffset};

use crate::event::Event;

/// A time span `[start, end)` borrowed from an event for one analysis pass.
#[derive(Debug, Clone, Copy)]
pub struct Interval<'a> {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub event: &'a Event,
}

impl<'a> Interval<'a> {
    /// Build an interval from an event, or None if either timestamp is unusable.
    pub fn from_event(event: &'a Event) -> Option<Self> {
        Some(Interval {
            start: event.start()?,
            end: event.end()?,
            event,
        })
    }

    /// Signed gap from the end of `self` to the start of `next`.
    /// Negative when the two overlap.
    pub fn gap_to(&self, next: &Interval<'_>) -> Duration {
        next.start - self.end
    }

    pub fn overlaps_next(&self, next: &Interval<'_>) -> bool {
        self.end > next.start
    }
}

/// Events sorted by start time, with a count of the records that could not be placed.
#[derive(Debug, Clone, Default)]
pub struct Timeline<'a> {
    intervals: Vec<Interval<'a>>,
    skipped: usize,
}

impl<'a> Timeline<'a> {
    /// Sort events ascending by start. Ties keep input order.
    pub fn from_events(events: &'a [Event]) -> Self {
        let mut intervals = Vec::with_capacity(events.len());
        let mut skipped = 0;

        for event in events {
            match Interval::from_event(event) {
                Some(interval) => intervals.push(interval),
                None => {
                    tracing::warn!(event_id = %event.id, "skipping event with missing or malformed timestamps");
                    skipped += 1;
                }
            }
        }

        // Stable sort
        intervals.sort_by_key(|i| i.start);

        Timeline { intervals, skipped }
    }

    pub fn intervals(&self) -> &[Interval<'a>] {
        &self.intervals
    }

    /// Number of events left out because of unusable timestamps.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Consecutive `(current, next)` pairs in start order.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&Interval<'a>, &Interval<'a>)> {
        self.intervals.windows(2).map(|w| (&w[0], &w[1]))
    }
}
