//! Route handler functions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shree_core::ChatRequest;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// False when the upstream API key is missing; chat calls will fail.
    pub upstream_configured: bool,
}

/// POST /api/chat - relay one conversation step upstream.
///
/// Responds with the upstream envelope as-is; the caller extracts the reply
/// text from it.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        tracing::debug!(status = %rejection.status(), "Rejected chat request body");
    })?;

    let envelope = state.relay.relay(&request).await?;
    Ok(Json(envelope))
}

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        upstream_configured: state.relay.is_configured(),
    })
}
