//! HTTP request handlers for the scoring endpoints.

use crate::auth::Claims;
use crate::error::ApiError;
use crate::types::{Decision, FraudRequest, FraudResponse, ScoreRequest, ScoreResponse};
use axum::extract::State;
use axum::{Extension, Json};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::error;

use super::ApiState;

/// `POST /score` — credit score for a client.
pub async fn score(
    State(state): State<ApiState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    request.validate()?;

    let start = Instant::now();
    let result = state.scoring.evaluate(&request).map_err(|e| {
        error!(client_id = %request.client_id, error = %e, "Credit scoring failed");
        ApiError::Internal
    })?;

    state.metrics.record_credit(
        start.elapsed(),
        result.score,
        result.decision == Decision::Accepted,
    );
    Ok(Json(result))
}

/// `POST /fraude` — fraud risk for a transaction.
pub async fn fraude(
    State(state): State<ApiState>,
    Json(request): Json<FraudRequest>,
) -> Result<Json<FraudResponse>, ApiError> {
    request.validate()?;

    let start = Instant::now();
    let result = state.fraud.evaluate(&request).map_err(|e| {
        error!(
            transaction_id = %request.transaction_id,
            client_id = %request.client_id,
            error = %e,
            "Fraud evaluation failed"
        );
        ApiError::Internal
    })?;

    state
        .metrics
        .record_fraud(start.elapsed(), result.risk, result.alert);
    Ok(Json(result))
}

/// `GET /admin/status` — service status with a metrics snapshot.
/// Requires the `admin` role on top of the route-level check.
pub async fn admin_status(
    State(state): State<ApiState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    if !claims.has_role("admin") {
        return Err(ApiError::Forbidden);
    }

    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "score_threshold": state.scoring.threshold(),
        "alert_threshold": state.fraud.alert_threshold(),
        "metrics": state.metrics.snapshot(),
    })))
}

/// Server start time, set once at process start.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// `GET /health` — unauthenticated liveness probe.
pub async fn health() -> Json<Value> {
    let start = START_TIME.get_or_init(Instant::now);
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": start.elapsed().as_secs(),
    }))
}
