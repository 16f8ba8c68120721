//! Fixtures shared by the unit tests. Everything happens on 2025-03-20 UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::event::Event;

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
}

pub fn time(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2025, 3, 20, hour, minute, 0)
        .unwrap()
        .fixed_offset()
}

/// Event whose id and title are both `name`.
pub fn event(name: &str, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Event {
    Event::new(
        name,
        name,
        time(start_hour, start_min),
        time(end_hour, end_min),
    )
}
