//! Free-slot discovery within working hours.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis_config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::event::Event;
use crate::interval::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Fits in the gap before an event.
    BeforeEvent,
    /// Fits after the last event of the day.
    EndOfDay,
}

/// A candidate meeting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Length of the whole gap the slot sits in, not just the slot
    pub available_minutes: i64,
    pub kind: SlotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_event_title: Option<String>,
}

/// What the caller is looking for.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRequest {
    pub day: NaiveDate,
    pub duration_minutes: u32,
    /// Offset the working hours are expressed in. Falls back to the earliest
    /// event's offset, then UTC.
    pub offset: Option<FixedOffset>,
}

impl SlotRequest {
    pub fn new(day: NaiveDate, duration_minutes: u32) -> Self {
        SlotRequest {
            day,
            duration_minutes,
            offset: None,
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Working-hours window for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl WorkingWindow {
    pub fn for_day(
        day: NaiveDate,
        offset: FixedOffset,
        config: &AnalysisConfig,
    ) -> AnalysisResult<Self> {
        Ok(WorkingWindow {
            start: at(day, config.working_hours_start, offset)?,
            end: at(day, config.working_hours_end, offset)?,
        })
    }
}

fn at(day: NaiveDate, time: NaiveTime, offset: FixedOffset) -> AnalysisResult<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&day.and_time(time))
        .single()
        .ok_or_else(|| AnalysisError::InvalidDate(format!("{day} {time} {offset}")))
}

/// Find up to `config.max_slots` slots of the requested length, earliest first.
///
/// The duration is checked against the configured bounds before anything else.
pub fn find_free_slots(
    events: &[Event],
    request: &SlotRequest,
    config: &AnalysisConfig,
) -> AnalysisResult<Vec<FreeSlot>> {
    config.check_duration(request.duration_minutes)?;

    let timeline = Timeline::from_events(events);
    let offset = request
        .offset
        .or_else(|| timeline.intervals().first().map(|i| *i.start.offset()))
        .unwrap_or_else(utc);
    let window = WorkingWindow::for_day(request.day, offset, config)?;
    let duration = Duration::minutes(i64::from(request.duration_minutes));

    let mut slots = Vec::new();
    let mut cursor = window.start;

    for interval in timeline.intervals() {
        if interval.start >= window.end {
            continue;
        }

        let gap = interval.start - cursor;
        if gap >= duration {
            slots.push(FreeSlot {
                start: cursor,
                end: cursor + duration,
                available_minutes: gap.num_minutes(),
                kind: SlotKind::BeforeEvent,
                next_event_title: Some(interval.event.title.clone()),
            });
        }

        cursor = cursor.max(interval.end);
    }

    let remaining = window.end - cursor;
    if remaining >= duration {
        slots.push(FreeSlot {
            start: cursor,
            end: cursor + duration,
            available_minutes: remaining.num_minutes(),
            kind: SlotKind::EndOfDay,
            next_event_title: None,
        });
    }

    slots.truncate(config.max_slots);
    Ok(slots)
}

fn utc() -> FixedOffset {
    Utc.fix()
}
