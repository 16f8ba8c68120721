//! Schedule analysis endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use calsight_core::analysis::ReportStatus;
use calsight_core::date_range::parse_day;
use calsight_core::{Conflict, DateRange, Event, FreeSlot, ScheduleReport};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar/optimize", post(optimize))
        .route("/calendar/conflicts/{user_id}", get(conflicts))
        .route("/calendar/suggest-times/{user_id}", get(suggest_times))
        .route("/calendar/events/{user_id}", get(events))
}

/// Optional date bounds shared by the GET endpoints
#[derive(Deserialize)]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RangeQuery {
    fn range(&self) -> Result<Option<DateRange>, AppError> {
        if self.start_date.is_none() && self.end_date.is_none() {
            return Ok(None);
        }
        let range = DateRange::from_args(self.start_date.as_deref(), self.end_date.as_deref())?;
        Ok(Some(range))
    }
}

/// Request body for schedule optimization
#[derive(Deserialize)]
pub struct OptimizeRequest {
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    /// Accepted for compatibility; not used by the analysis.
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub message: String,
    pub data: ScheduleReport,
}

/// POST /calendar/optimize - Conflicts and optimizations for a date range
async fn optimize(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let range = DateRange::from_args(Some(&req.start_date), Some(&req.end_date))?;
    let report = state.analyzer.optimize(&req.user_id, &range).await;

    Ok(Json(OptimizeResponse {
        success: report.status != ReportStatus::Degraded,
        message: report.message.clone(),
        data: report,
    }))
}

#[derive(Serialize)]
pub struct ConflictsResponse {
    pub user_id: String,
    pub events_analyzed: usize,
    pub conflicts_found: usize,
    pub conflicts: Vec<Conflict>,
}

/// GET /calendar/conflicts/:user_id - Adjacent overlaps in a user's schedule
async fn conflicts(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ConflictsResponse>, AppError> {
    let range = query.range()?;
    let report = state.analyzer.conflicts(&user_id, range.as_ref()).await;

    Ok(Json(ConflictsResponse {
        user_id,
        events_analyzed: report.events_analyzed,
        conflicts_found: report.conflicts_found,
        conflicts: report.conflicts,
    }))
}

#[derive(Deserialize)]
pub struct SuggestTimesQuery {
    pub duration_minutes: u32,
    pub preferred_date: String,
}

#[derive(Serialize)]
pub struct SuggestTimesResponse {
    pub user_id: String,
    pub duration_minutes: u32,
    pub preferred_date: String,
    pub suggestions: Vec<FreeSlot>,
}

/// GET /calendar/suggest-times/:user_id - Free slots on one day
async fn suggest_times(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<SuggestTimesQuery>,
) -> Result<Json<SuggestTimesResponse>, AppError> {
    let (day, offset) = parse_day(&query.preferred_date)?;
    let suggestions = state
        .analyzer
        .suggest_times(&user_id, query.duration_minutes, day, offset)
        .await?;

    Ok(Json(SuggestTimesResponse {
        user_id,
        duration_minutes: query.duration_minutes,
        preferred_date: query.preferred_date,
        suggestions,
    }))
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub user_id: String,
    pub event_count: usize,
    pub events: Vec<Event>,
}

/// GET /calendar/events/:user_id - Proxy to the calendar backend
async fn events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<EventsResponse>, AppError> {
    let range = query.range()?;
    let (events, _) = state.analyzer.events(&user_id, range.as_ref()).await;

    Ok(Json(EventsResponse {
        user_id,
        event_count: events.len(),
        events,
    }))
}
