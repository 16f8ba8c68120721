use std::sync::Arc;

use axum::{Router, body::Body};
use calsight_core::source::StaticSource;
use calsight_core::{Event, EventCategory};
use calsight_server::settings::ServerSettings;
use calsight_server::state::AppState;
use chrono::{DateTime, FixedOffset};

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

/// Two overlapping work meetings on 2025-03-20, plus one the next day.
pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new(
            "1",
            "Standup",
            at("2025-03-20T09:00:00+00:00"),
            at("2025-03-20T10:00:00+00:00"),
        )
        .with_category(EventCategory::Work),
        Event::new(
            "2",
            "Design review",
            at("2025-03-20T09:30:00+00:00"),
            at("2025-03-20T10:30:00+00:00"),
        )
        .with_category(EventCategory::Work),
        Event::new(
            "3",
            "Lunch",
            at("2025-03-21T12:00:00+00:00"),
            at("2025-03-21T13:00:00+00:00"),
        ),
    ]
}

pub fn test_app_with(settings: ServerSettings, events: Vec<Event>) -> Router {
    let state = AppState::with_source(settings, Arc::new(StaticSource(events)));
    calsight_server::app(state)
}

pub fn test_app() -> Router {
    test_app_with(ServerSettings::default(), sample_events())
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
