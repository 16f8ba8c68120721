//! Calendar backend reached over GraphQL/HTTP.

use std::time::Duration;

use async_trait::async_trait;

use crate::date_range::DateRange;
use crate::error::{AnalysisError, AnalysisResult};
use crate::event::Event;
use crate::source::EventSource;
use crate::source::protocol::{GraphqlQuery, ListEvents, ListEventsInRange, Request, Response};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GraphqlSource {
    endpoint: String,
    client: reqwest::Client,
}

impl GraphqlSource {
    pub fn new(endpoint: impl Into<String>) -> AnalysisResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::EventSource(format!("Failed to build HTTP client: {e}")))?;

        Ok(GraphqlSource {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a typed query and return the events it carries.
    pub async fn call<Q: GraphqlQuery>(&self, query: Q) -> AnalysisResult<Vec<Event>> {
        let request = Request {
            query: Q::query(),
            variables: query,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::EventSource(format!("Request to {} failed: {e}", self.endpoint)))?
            .error_for_status()
            .map_err(|e| AnalysisError::EventSource(e.to_string()))?;

        let body: Response<Q::Response> = response
            .json()
            .await
            .map_err(|e| AnalysisError::Serialization(format!("Failed to parse response: {e}")))?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(AnalysisError::EventSource(format!(
                "GraphQL errors: {}",
                messages.join("; ")
            )));
        }

        Ok(body.data.map(Q::into_events).unwrap_or_default())
    }
}

#[async_trait]
impl EventSource for GraphqlSource {
    async fn fetch_events(
        &self,
        user_id: &str,
        range: Option<&DateRange>,
    ) -> AnalysisResult<Vec<Event>> {
        match range {
            Some(DateRange {
                from: Some(from),
                to: Some(to),
            }) => {
                self.call(ListEventsInRange {
                    user_id: user_id.to_string(),
                    start_time: from.to_rfc3339(),
                    end_time: to.to_rfc3339(),
                })
                .await
            }
            // Half-open ranges: fetch everything and trim locally.
            Some(range) => {
                let events = self
                    .call(ListEvents {
                        user_id: user_id.to_string(),
                    })
                    .await?;
                Ok(range.filter(events))
            }
            None => {
                self.call(ListEvents {
                    user_id: user_id.to_string(),
                })
                .await
            }
        }
    }
}
