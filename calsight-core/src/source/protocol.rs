//! GraphQL wire types for the calendar backend.
//!
//! Each query is a typed struct: its variables serialize as the request's
//! `variables`, and its associated `Response` names the shape of `data`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::Event;

const EVENT_FIELDS: &str = "id title description startTime endTime location category priority";

pub trait GraphqlQuery: Serialize {
    type Response: DeserializeOwned;

    fn query() -> String;

    /// Pull the payload out of the response's `data` object.
    fn into_events(response: Self::Response) -> Vec<Event>;
}

/// All events for a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEvents {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListEventsData {
    #[serde(default)]
    pub events: Vec<Event>,
}

impl GraphqlQuery for ListEvents {
    type Response = ListEventsData;

    fn query() -> String {
        format!(
            "query GetEvents($userId: String!) {{ events(userId: $userId) {{ {EVENT_FIELDS} }} }}"
        )
    }

    fn into_events(response: Self::Response) -> Vec<Event> {
        response.events
    }
}

/// Events for a user between two RFC 3339 instants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsInRange {
    pub user_id: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsInRangeData {
    #[serde(default)]
    pub events_by_date_range: Vec<Event>,
}

impl GraphqlQuery for ListEventsInRange {
    type Response = ListEventsInRangeData;

    fn query() -> String {
        format!(
            "query GetEventsByDateRange($userId: String!, $startTime: DateTime!, $endTime: DateTime!) {{ \
             eventsByDateRange(userId: $userId, startTime: $startTime, endTime: $endTime) {{ {EVENT_FIELDS} }} }}"
        )
    }

    fn into_events(response: Self::Response) -> Vec<Event> {
        response.events_by_date_range
    }
}

/// Request body sent to the backend.
#[derive(Debug, Serialize)]
pub struct Request<V> {
    pub query: String,
    pub variables: V,
}

/// Response body from the backend.
#[derive(Debug, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_serializes_camel_case_variables() {
        let request = Request {
            query: ListEventsInRange::query(),
            variables: ListEventsInRange {
                user_id: "u1".into(),
                start_time: "2025-03-20T00:00:00+00:00".into(),
                end_time: "2025-03-20T23:59:59+00:00".into(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["variables"]["userId"], "u1");
        assert_eq!(json["variables"]["startTime"], "2025-03-20T00:00:00+00:00");
        assert!(json["query"].as_str().unwrap().contains("eventsByDateRange"));
    }

    #[test]
    fn test_response_with_errors_and_no_data() {
        let body = r#"{"data": null, "errors": [{"message": "boom"}]}"#;
        let response: Response<ListEventsData> = serde_json::from_str(body).unwrap();

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "boom");
    }
}
