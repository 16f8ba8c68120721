//! Colored terminal rendering for analysis results.

use calsight_core::analysis::ReportStatus;
use calsight_core::wording::time_of_day;
use calsight_core::{Conflict, Event, FreeSlot, ScheduleReport, SlotKind, Suggestion, SuggestionKind};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// "1 conflict", "3 conflicts"
pub fn count(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

fn event_span(event: &Event) -> String {
    match (event.start(), event.end()) {
        (Some(start), Some(end)) => format!("{}-{}", time_of_day(start), time_of_day(end)),
        _ => "??:??".to_string(),
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {}", event_span(self).dimmed(), self.title)
    }
}

impl Render for Conflict {
    fn render(&self) -> String {
        let [current, next] = &self.conflicting_events;
        let mut lines = vec![
            format!("{} {}", "!".red(), current.render()),
            format!("{} {}", "!".red(), next.render()),
        ];

        for suggestion in &self.resolution_suggestions {
            lines.push(format!("     {}", suggestion.dimmed()));
        }
        lines.push(format!("   {} {}", "→".green(), self.recommended_action));

        lines.join("\n")
    }
}

impl Render for Suggestion {
    fn render(&self) -> String {
        let symbol = match self.kind {
            SuggestionKind::BufferTime => "~".yellow().to_string(),
            SuggestionKind::BreakRecommendation => "*".cyan().to_string(),
        };
        format!("{} {}\n    {}", symbol, self.message, self.detail.dimmed())
    }
}

impl Render for FreeSlot {
    fn render(&self) -> String {
        let span = format!("{}-{}", time_of_day(self.start), time_of_day(self.end));
        let context = match (&self.kind, &self.next_event_title) {
            (SlotKind::BeforeEvent, Some(title)) => format!("before {}", title),
            _ => "end of day".to_string(),
        };

        format!(
            "{} {} {}",
            span.green(),
            format!("({} min free)", self.available_minutes).dimmed(),
            context.dimmed()
        )
    }
}

impl Render for ScheduleReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let header = match self.status {
            ReportStatus::Completed => self.message.bold().to_string(),
            ReportStatus::NoEvents => return self.message.dimmed().to_string(),
            ReportStatus::Degraded => return self.message.red().to_string(),
        };
        lines.push(header);

        let mut summary = format!(
            "{} analyzed, {}",
            count(self.events_analyzed, "event"),
            count(self.conflicts_found, "conflict")
        );
        if self.events_skipped > 0 {
            summary.push_str(&format!(", {} skipped", self.events_skipped));
        }
        lines.push(summary.dimmed().to_string());

        if !self.conflicts.is_empty() {
            lines.push(String::new());
            lines.push("Conflicts:".bold().to_string());
            for conflict in &self.conflicts {
                lines.push(conflict.render());
            }
        }

        if !self.optimizations.is_empty() {
            lines.push(String::new());
            lines.push("Suggestions:".bold().to_string());
            for suggestion in &self.optimizations {
                lines.push(suggestion.render());
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calsight_core::detect_conflicts;
    use chrono::DateTime;

    fn event(id: &str, start: &str, end: &str) -> Event {
        Event::new(
            id,
            id,
            DateTime::parse_from_rfc3339(start).unwrap(),
            DateTime::parse_from_rfc3339(end).unwrap(),
        )
    }

    #[test]
    fn conflict_shows_recommended_action() {
        let events = vec![
            event("A", "2025-03-20T09:00:00+00:00", "2025-03-20T10:00:00+00:00"),
            event("B", "2025-03-20T09:30:00+00:00", "2025-03-20T10:30:00+00:00"),
        ];
        let conflicts = detect_conflicts(&events);

        let out = conflicts[0].render();

        assert!(out.contains("Reschedule 'B' to start at 10:00"));
        for suggestion in &conflicts[0].resolution_suggestions {
            assert!(out.contains(suggestion.as_str()));
        }
    }

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(1, "event"), "1 event");
        assert_eq!(count(0, "conflict"), "0 conflicts");
        assert_eq!(count(3, "conflict"), "3 conflicts");
    }
}
