//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::errors::Result;
use crate::events::{EventKind, EventRecord, SubjectKind};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Stored event type, e.g. `contribution_made`.
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct SubjectEventsResponse {
    pub subject_kind: SubjectKind,
    pub subject_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn subject_response(
    subject_kind: SubjectKind,
    subject_id: String,
    result: Result<Vec<EventRecord>>,
) -> Response {
    match result {
        Ok(events) => (
            StatusCode::OK,
            Json(SubjectEventsResponse {
                subject_kind,
                subject_id,
                count: events.len(),
                events,
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events[?kind=<event_type>]`
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EventsQuery>,
) -> Response {
    if let Some(kind) = query.kind.as_deref() {
        if EventKind::from_str_id(kind).is_none() && kind != EventKind::Unknown.as_str() {
            return error_response(StatusCode::BAD_REQUEST, format!("unknown event kind: {kind}"));
        }
    }

    match db::get_events(&state.pool, query.kind.as_deref()).await {
        Ok(events) => (
            StatusCode::OK,
            Json(AllEventsResponse {
                count: events.len(),
                events,
            }),
        )
            .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// `GET /projects/:id/events`
pub async fn get_project_events(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Response {
    let result = db::get_events_for_subject(&state.pool, SubjectKind::Project, &id).await;
    subject_response(SubjectKind::Project, id, result)
}

/// `GET /gatherings/:id/events`: moderation history of a registry event.
pub async fn get_gathering_events(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Response {
    let result = db::get_events_for_subject(&state.pool, SubjectKind::Gathering, &id).await;
    subject_response(SubjectKind::Gathering, id, result)
}

/// `GET /medals/:id/events`
pub async fn get_medal_events(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Response {
    let result = db::get_events_for_subject(&state.pool, SubjectKind::Medal, &id).await;
    subject_response(SubjectKind::Medal, id, result)
}

/// `GET /accounts/:address/events`
pub async fn get_account_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    let result = db::get_events_for_account(&state.pool, &address).await;
    subject_response(SubjectKind::Account, address, result)
}
