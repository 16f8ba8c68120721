//! Events read from a JSON file on disk.
//!
//! Accepts either a bare array of events or the backend's
//! `{"data": {"events": [...]}}` envelope, so exported API responses can be
//! analyzed as-is.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::date_range::DateRange;
use crate::error::{AnalysisError, AnalysisResult};
use crate::event::Event;
use crate::source::EventSource;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventFile {
    Events(Vec<Event>),
    Envelope { data: EnvelopeData },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeData {
    #[serde(default, alias = "eventsByDateRange")]
    events: Vec<Event>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        JsonFileSource {
            path: PathBuf::from(expanded),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file.
    pub async fn load(&self) -> AnalysisResult<Vec<Event>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_events(&content).map_err(|e| {
            AnalysisError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }
}

fn parse_events(content: &str) -> Result<Vec<Event>, serde_json::Error> {
    Ok(match serde_json::from_str::<EventFile>(content)? {
        EventFile::Events(events) => events,
        EventFile::Envelope { data } => data.events,
    })
}

#[async_trait]
impl EventSource for JsonFileSource {
    async fn fetch_events(
        &self,
        _user_id: &str,
        range: Option<&DateRange>,
    ) -> AnalysisResult<Vec<Event>> {
        let events = self.load().await?;
        Ok(match range {
            Some(range) => range.filter(events),
            None => events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_bare_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[{"id": "1", "title": "Standup", "startTime": "2025-03-20T09:00:00Z", "endTime": "2025-03-20T09:15:00Z"}]"#,
        )
        .unwrap();

        let events = JsonFileSource::new(&path).fetch_events("me", None).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Standup");
    }

    #[tokio::test]
    async fn test_reads_backend_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"{"data": {"eventsByDateRange": [{"id": "1", "title": "Review"}]}}"#,
        )
        .unwrap();

        let events = JsonFileSource::new(&path).load().await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
    }

    #[tokio::test]
    async fn test_bad_record_does_not_sink_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "1", "title": "Standup", "startTime": "2025-03-20T09:00:00Z", "endTime": "2025-03-20T09:15:00Z"},
                {"id": "2", "title": "Broken", "startTime": 1742461200000, "endTime": "2025-03-20T10:00:00Z", "priority": "CRITICAL"}
            ]"#,
        )
        .unwrap();

        let events = JsonFileSource::new(&path).load().await.unwrap();
        assert_eq!(events.len(), 2);

        let timeline = crate::interval::Timeline::from_events(&events);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.skipped(), 1);
        assert_eq!(timeline.intervals()[0].event.title, "Standup");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::new(dir.path().join("missing.json"))
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Io(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileSource::new(&path).load().await.unwrap_err();
        assert!(matches!(err, AnalysisError::Serialization(_)));
    }
}
