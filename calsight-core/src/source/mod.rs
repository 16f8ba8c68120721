//! Where events come from.
//!
//! The analysis engine never fetches anything itself. Hosts hand it an
//! [`EventSource`]; failures from the source are logged by the caller and
//! treated as an empty calendar.

pub mod graphql;
pub mod json_file;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;

use crate::date_range::DateRange;
use crate::error::AnalysisResult;
use crate::event::Event;

pub use graphql::GraphqlSource;
pub use json_file::JsonFileSource;

/// Fetch a user's events, optionally limited to a date range.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(
        &self,
        user_id: &str,
        range: Option<&DateRange>,
    ) -> AnalysisResult<Vec<Event>>;
}

#[async_trait]
impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    async fn fetch_events(
        &self,
        user_id: &str,
        range: Option<&DateRange>,
    ) -> AnalysisResult<Vec<Event>> {
        (**self).fetch_events(user_id, range).await
    }
}

/// In-memory source. Ignores `user_id`; filters by range.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<Event>);

#[async_trait]
impl EventSource for StaticSource {
    async fn fetch_events(
        &self,
        _user_id: &str,
        range: Option<&DateRange>,
    ) -> AnalysisResult<Vec<Event>> {
        Ok(match range {
            Some(range) => range.filter(self.0.clone()),
            None => self.0.clone(),
        })
    }
}

impl From<Vec<Event>> for StaticSource {
    fn from(events: Vec<Event>) -> Self {
        StaticSource(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::event;

    #[tokio::test]
    async fn test_static_source_filters_by_range() {
        let source = StaticSource::from(vec![event("a", 9, 0, 10, 0)]);

        let all = source.fetch_events("anyone", None).await.unwrap();
        assert_eq!(all.len(), 1);

        let later = DateRange::from_args(Some("2025-04-01"), None).unwrap();
        let none = source.fetch_events("anyone", Some(&later)).await.unwrap();
        assert!(none.is_empty());
    }
}
