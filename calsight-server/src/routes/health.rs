//! Health and banner endpoints

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// GET / - Service banner
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "calsight schedule analysis server".to_string(),
        version: VERSION.to_string(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub dependencies: BTreeMap<String, String>,
}

/// GET /health - Service status plus a probe of the calendar backend
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = probe_backend(&state.settings.backend_health_url).await;

    let mut dependencies = BTreeMap::new();
    dependencies.insert("backend_api".to_string(), backend.to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
        dependencies,
    })
}

/// "available" on 200, "degraded" on any other status, "unavailable" if unreachable.
async fn probe_backend(url: &str) -> &'static str {
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "could not build health probe client");
            return "unavailable";
        }
    };

    match client.get(url).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => "available",
        Ok(response) => {
            tracing::warn!(status = %response.status(), "backend health check degraded");
            "degraded"
        }
        Err(e) => {
            tracing::warn!(error = %e, "backend health check failed");
            "unavailable"
        }
    }
}
