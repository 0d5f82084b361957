//! Error types for albumvote-server
//!
//! Each failure kind maps to its own HTTP status:
//! - `AuthFailed` -> 403 (provider rejected the login; not retried)
//! - `FetchFailed` -> 500 (catalog unreachable or erroring; no partial list)
//! - `Cancelled` -> 504 (catalog fetch hit its deadline or shutdown)
//! - `InvalidVoteTarget` -> 400

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::OAuthError;
use crate::catalog::CatalogError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login rejected (403)
    #[error("Authentication failed: {0}")]
    AuthFailed(#[from] OAuthError),

    /// Catalog fetch failed (500)
    #[error("Catalog fetch failed: {0}")]
    FetchFailed(String),

    /// Catalog fetch cancelled (504)
    #[error("Catalog fetch cancelled")]
    Cancelled,

    /// Empty or malformed album identifier (400)
    #[error("Invalid vote target: {0}")]
    InvalidVoteTarget(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Cancelled => ApiError::Cancelled,
            CatalogError::FetchFailed { .. } => ApiError::FetchFailed(err.to_string()),
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::AuthFailed(_) => (StatusCode::FORBIDDEN, "AUTH_FAILED"),
            ApiError::FetchFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "FETCH_FAILED"),
            ApiError::Cancelled => (StatusCode::GATEWAY_TIMEOUT, "CANCELLED"),
            ApiError::InvalidVoteTarget(_) => (StatusCode::BAD_REQUEST, "INVALID_VOTE_TARGET"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(code = error_code, "{}", message);
        } else {
            warn!(code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PageError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::AuthFailed(OAuthError::StateMismatch), StatusCode::FORBIDDEN),
            (ApiError::FetchFailed("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::Cancelled, StatusCode::GATEWAY_TIMEOUT),
            (ApiError::InvalidVoteTarget("".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_catalog_error_conversion() {
        let err: ApiError = CatalogError::Cancelled.into();
        assert!(matches!(err, ApiError::Cancelled));

        let err: ApiError = CatalogError::FetchFailed {
            offset: 100,
            cause: PageError::Timeout,
        }
        .into();
        match err {
            ApiError::FetchFailed(msg) => assert!(msg.contains("offset 100")),
            other => panic!("expected FetchFailed, got {:?}", other),
        }
    }
}
