//! Error types and their HTTP mapping.
//!
//! The taxonomy follows the boundary rules: validation failures answer 422
//! before the pipeline runs, authentication failures 401, authorization
//! failures 403, and anything internal 500 with a generic message. Internal
//! error text is logged server-side and never returned to the caller.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors produced while verifying a bearer token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on the request.
    #[error("missing bearer token")]
    MissingToken,

    /// The token names a signing key the provider never published.
    #[error("unknown signing key: {0}")]
    UnknownKey(String),

    /// The token carries no key id and no default key is configured.
    #[error("token has no key id")]
    MissingKeyId,

    /// Signature, issuer, audience or expiry check failed.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The key set could not be fetched from the identity provider.
    #[error("failed to fetch identity provider keys: {0}")]
    KeyFetch(#[from] reqwest::Error),

    /// The published key set contains no key this service can use.
    #[error("no usable signing keys in the published key set")]
    NoUsableKeys,

    /// Valid token, but none of the required roles.
    #[error("insufficient role")]
    Forbidden,
}

/// Errors produced by a predictive model or its loader.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse model file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// The feature vector does not match what the model was trained on.
    #[error("feature vector length mismatch: model expects {expected}, got {got}")]
    FeatureShape { expected: usize, got: usize },

    #[error("model inference failed: {0}")]
    Inference(String),
}

/// API-level error rendered as an HTTP response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input, rejected before the pipeline.
    #[error("{0}")]
    Validation(String),

    /// Missing, expired or otherwise invalid token.
    #[error("{0}")]
    Unauthorized(AuthError),

    /// Valid token, insufficient role.
    #[error("insufficient role for this resource")]
    Forbidden,

    /// Anything unexpected. The cause is logged where it happened.
    #[error("internal server error")]
    Internal,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => ApiError::Forbidden,
            other => ApiError::Unauthorized(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "detail": self.to_string() }));
        let mut response = (status, body).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AuthError::MissingToken;
        assert_eq!(err.to_string(), "missing bearer token");

        let err = AuthError::UnknownKey("abc".into());
        assert_eq!(err.to_string(), "unknown signing key: abc");

        let err = ModelError::FeatureShape {
            expected: 4,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "feature vector length mismatch: model expects 4, got 2"
        );

        let err = ApiError::Internal;
        assert_eq!(err.to_string(), "internal server error");
    }

    #[test]
    fn forbidden_auth_error_maps_to_forbidden() {
        let err: ApiError = AuthError::Forbidden.into();
        assert!(matches!(err, ApiError::Forbidden));

        let err: ApiError = AuthError::MissingToken.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn status_codes() {
        let resp = ApiError::Validation("bad age".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = ApiError::Unauthorized(AuthError::MissingToken).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

        let resp = ApiError::Forbidden.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = ApiError::Internal.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
