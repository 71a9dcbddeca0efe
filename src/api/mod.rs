//! HTTP API: router, shared state and authentication middleware.

pub mod handlers;

use crate::auth::{rbac, TokenVerifier};
use crate::error::{ApiError, AuthError};
use crate::metrics::ServiceMetrics;
use crate::services::{CreditScorer, FraudDetector};
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state accessible by all handlers. Everything is constructed once
/// at startup and injected; nothing here mutates after load.
#[derive(Clone)]
pub struct ApiState {
    pub scoring: Arc<CreditScorer>,
    pub fraud: Arc<FraudDetector>,
    pub verifier: Arc<TokenVerifier>,
    pub metrics: Arc<ServiceMetrics>,
    /// Roles allowed on the scoring endpoints
    pub allowed_roles: Arc<Vec<String>>,
}

/// Build the full router. `/health` stays outside the auth layer.
pub fn build_router(state: ApiState) -> Router {
    let protected = Router::new()
        .route("/score", post(handlers::score))
        .route("/fraude", post(handlers::fraude))
        .route("/admin/status", get(handlers::admin_status))
        .layer(middleware::from_fn_with_state(state.clone(), authorize));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Verify the bearer token and the caller's roles, then stash the claims
/// in request extensions for handlers that need them.
async fn authorize(
    State(state): State<ApiState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)?;
    let claims = state.verifier.verify(token)?;
    rbac::require_any_role(&claims, &state.allowed_roles)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, AuthError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}
