//! Event records as delivered by the calendar backend.
//!
//! These mirror the backend's JSON shape (camelCase keys, timestamps as
//! ISO-8601 strings). calsight never mutates them; the interval model parses
//! the timestamps when an analysis needs them.
//!
//! Deserialization is lenient per field: a value of the wrong type becomes
//! `None` (or an empty string) so one bad record is skipped by the analysis
//! instead of failing the whole batch.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A calendar event (read-only to calsight)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Raw start timestamp (e.g. "2025-03-20T09:00:00+09:00")
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    /// Raw end timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<EventCategory>,
    #[serde(
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<EventPriority>,
}

/// Strings pass through; anything else is dropped.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Numeric ids are kept as their decimal text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

impl Event {
    /// Create a timed event with no category, location or priority.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            description: None,
            start_time: Some(start.to_rfc3339()),
            end_time: Some(end.to_rfc3339()),
            location: None,
            category: None,
            priority: None,
        }
    }

    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Parsed start, or None if missing or malformed.
    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        self.start_time.as_deref().and_then(parse_timestamp)
    }

    /// Parsed end, or None if missing or malformed.
    pub fn end(&self) -> Option<DateTime<FixedOffset>> {
        self.end_time.as_deref().and_then(parse_timestamp)
    }

    pub fn is_work(&self) -> bool {
        self.category == Some(EventCategory::Work)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Event category, used by the workload heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Work,
    Personal,
    Health,
    Social,
    Education,
    Travel,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPriority {
    Low,
    Medium,
    High,
    Urgent,
    #[serde(other)]
    Other,
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (including a trailing `Z`). Timestamps without an offset
/// are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_timestamp_accepts_z_suffix() {
        let dt = parse_timestamp("2025-03-20T09:00:00Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_timestamp_keeps_offset() {
        let dt = parse_timestamp("2025-03-20T09:00:00+09:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_timestamp_without_offset_is_utc() {
        let dt = parse_timestamp("2025-03-20T09:30:00").unwrap();
        let expected = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 20, 9, 30, 0)
            .unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("next tuesday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "id": "evt-1",
            "title": "Standup",
            "startTime": "2025-03-20T09:00:00Z",
            "endTime": "2025-03-20T09:15:00Z",
            "category": "WORK",
            "priority": "HIGH",
            "createdAt": "2025-03-01T00:00:00Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.title, "Standup");
        assert!(event.is_work());
        assert_eq!(event.priority, Some(EventPriority::High));
        assert!(event.start().is_some());
    }

    #[test]
    fn test_wrong_typed_fields_are_dropped() {
        let json = r#"{
            "id": 42,
            "title": "Epoch millis",
            "startTime": 1742461200000,
            "endTime": "2025-03-20T10:00:00Z",
            "category": 7,
            "priority": "CRITICAL",
            "location": {"room": 4}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "42");
        assert!(event.start_time.is_none());
        assert!(event.start().is_none());
        assert!(event.end().is_some());
        assert!(event.category.is_none());
        assert_eq!(event.priority, Some(EventPriority::Other));
        assert!(event.location.is_none());
    }

    #[test]
    fn test_missing_id_defaults_to_empty() {
        let event: Event = serde_json::from_str(r#"{"title": "Anonymous"}"#).unwrap();
        assert_eq!(event.id, "");
        assert_eq!(event.title, "Anonymous");
    }

    #[test]
    fn test_unknown_category_is_other() {
        let json = r#"{"id": "evt-2", "title": "Gig", "category": "MUSIC"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, Some(EventCategory::Other));
        assert!(event.start().is_none());
    }
}
