//! Human-readable text for conflicts and suggestions.
//!
//! Detection code never builds strings itself; it calls into here.

use chrono::{DateTime, FixedOffset};

use crate::event::Event;

pub fn shorten_current(current: &Event, next: &Event) -> String {
    format!(
        "Shorten '{}' to end before '{}' starts",
        current.title, next.title
    )
}

pub fn move_next(current: &Event, next: &Event) -> String {
    format!(
        "Move '{}' to start after '{}' ends",
        next.title, current.title
    )
}

pub fn make_virtual(current: &Event, next: &Event) -> String {
    match current.location.as_deref().filter(|l| !l.is_empty()) {
        Some(location) => format!(
            "Make '{}' or '{}' virtual to eliminate travel time from {}",
            current.title, next.title, location
        ),
        None => format!(
            "Make '{}' or '{}' virtual to eliminate travel time",
            current.title, next.title
        ),
    }
}

/// "Reschedule 'B' to start at 10:00"
pub fn reschedule(next: &Event, at: DateTime<FixedOffset>) -> String {
    format!("Reschedule '{}' to start at {}", next.title, time_of_day(at))
}

pub fn buffer_message(current: &Event, next: &Event) -> String {
    format!(
        "Add buffer time between '{}' and '{}'",
        current.title, next.title
    )
}

pub fn buffer_detail() -> String {
    "Consider adding 15-30 minutes between meetings for transition time".to_string()
}

pub fn overload_message() -> String {
    "Heavy work schedule detected".to_string()
}

pub fn overload_detail(work_events: usize) -> String {
    format!(
        "{work_events} work events scheduled. Consider scheduling breaks between work blocks for better productivity"
    )
}

pub fn time_of_day(at: DateTime<FixedOffset>) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::event;

    #[test]
    fn test_virtual_suggestion_mentions_location() {
        let current = event("a", 9, 0, 10, 0).with_location("Room 4");
        let next = event("b", 9, 30, 10, 30);

        assert!(make_virtual(&current, &next).ends_with("from Room 4"));
        assert!(!make_virtual(&next, &current).contains("from"));
    }

    #[test]
    fn test_reschedule_uses_event_offset() {
        let next = event("b", 9, 30, 10, 30);
        let at = chrono::DateTime::parse_from_rfc3339("2025-03-20T10:00:00+09:00").unwrap();

        assert_eq!(reschedule(&next, at), "Reschedule 'b' to start at 10:00");
    }
}
