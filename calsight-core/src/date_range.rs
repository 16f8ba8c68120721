//! Date range for fetching and filtering events.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::error::{AnalysisError, AnalysisResult};
use crate::event::{Event, parse_timestamp};

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Parse CLI/query arguments into a DateRange.
    /// Each bound is YYYY-MM-DD or a full timestamp; a bare `from` date is
    /// read as start of day and a bare `to` date as end of day (UTC).
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> AnalysisResult<Self> {
        let from_dt = from.map(|s| parse_bound(s, NaiveTime::MIN)).transpose()?;
        let to_dt = to.map(|s| parse_bound(s, end_of_day())).transpose()?;

        if let (Some(from), Some(to)) = (from_dt, to_dt) {
            if to < from {
                return Err(AnalysisError::InvalidDate(format!(
                    "end {} is before start {}",
                    to.to_rfc3339(),
                    from.to_rfc3339()
                )));
            }
        }

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// The whole of `day` in the given offset, from midnight to the last second.
    pub fn for_day(day: NaiveDate, offset: FixedOffset) -> AnalysisResult<Self> {
        let start = offset
            .from_local_datetime(&day.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(|| AnalysisError::InvalidDate(day.to_string()))?;

        Ok(DateRange::new(
            start.with_timezone(&Utc),
            (start + Duration::days(1) - Duration::seconds(1)).with_timezone(&Utc),
        ))
    }

    /// True when the event starts inside the range. Events without a
    /// parseable start are kept so the analysis can count them as skipped.
    pub fn contains(&self, event: &Event) -> bool {
        let Some(start) = event.start() else {
            return true;
        };
        let start = start.with_timezone(&Utc);

        self.from.is_none_or(|from| start >= from) && self.to.is_none_or(|to| start <= to)
    }

    pub fn filter(&self, events: Vec<Event>) -> Vec<Event> {
        events.into_iter().filter(|e| self.contains(e)).collect()
    }
}

/// Parse a day argument: YYYY-MM-DD (read as UTC) or a timestamp, whose
/// local date and offset are used.
pub fn parse_day(s: &str) -> AnalysisResult<(NaiveDate, FixedOffset)> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok((date, Utc.fix()));
    }

    parse_timestamp(s)
        .map(|dt| (dt.date_naive(), *dt.offset()))
        .ok_or_else(|| {
            AnalysisError::InvalidDate(format!(
                "Invalid date format '{}'. Expected YYYY-MM-DD or an ISO-8601 timestamp",
                s
            ))
        })
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(s: &str, time: NaiveTime) -> AnalysisResult<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(time).and_utc());
    }

    parse_timestamp(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AnalysisError::InvalidDate(format!(
                "Invalid date format '{}'. Expected YYYY-MM-DD or an ISO-8601 timestamp",
                s
            ))
        })
}
