//! HTTP control surface.
//!
//! `GET /state` reports the display state, `POST /state` changes one field
//! of it, `GET /health` reports liveness and render statistics. Handlers
//! only touch the [`StateStore`]; they never wait on the render loop.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, SecondsFormat};
use serde::Serialize;

use crate::error::ValidationError;
use crate::frame_scheduler::{RenderStats, StatsSnapshot};
use crate::state::{StateStore, StateUpdate};

/// Shared state for the handlers
#[derive(Clone)]
pub struct AppState {
    pub store: StateStore,
    pub stats: Arc<RenderStats>,
    started: Instant,
}

impl AppState {
    pub fn new(store: StateStore, stats: Arc<RenderStats>) -> Self {
        Self {
            store,
            stats,
            started: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(get_state).post(post_state))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct StateResponse {
    now: String,
    mode: u8,
    color: String,
    offset: i64,
}

async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.store.read();
    Json(StateResponse {
        now: Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        mode: snapshot.mode.as_raw(),
        color: snapshot.color.to_string(),
        offset: snapshot.offset,
    })
}

/// Rejected request; the reason goes back as plain text
struct ApiError(ValidationError);

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
    }
}

async fn post_state(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<&'static str, ApiError> {
    let [(key, value)] = fields.as_slice() else {
        tracing::debug!(fields = fields.len(), "rejected state update");
        return Err(ValidationError::FieldCount(fields.len()).into());
    };

    let update = StateUpdate::from_field(key, value).inspect_err(|e| {
        tracing::debug!(%key, %value, error = %e, "rejected state update");
    })?;
    let next = state.store.apply(update);
    tracing::info!(
        mode = next.mode.as_str(),
        color = %next.color,
        offset = next.offset,
        "state updated"
    );

    Ok("ok")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
    render: StatsSnapshot,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
        render: state.stats.snapshot(),
    })
}
