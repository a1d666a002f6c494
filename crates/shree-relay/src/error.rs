//! Relay error types and JSON error response formatting.
//!
//! Every failure leaves the relay as `{ "error": "<message>" }` with a
//! non-success status code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Failures of a single relay attempt.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The upstream API key is not configured.
    #[error("Missing API Key")]
    MissingApiKey,
    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The request never completed (connect, timeout, TLS).
    #[error("upstream request failed: {0}")]
    Transport(String),
    /// The upstream answered 2xx with a body that is not JSON.
    #[error("upstream response was not valid JSON: {0}")]
    InvalidResponse(String),
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be read or decoded; carries the rejection status.
    Rejected(StatusCode, String),
    /// 429 Too Many Requests.
    TooManyRequests(String),
    /// 500 Internal Server Error - missing configuration.
    Configuration(String),
    /// 500 Internal Server Error - upstream call failed.
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            ApiError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::MissingApiKey => ApiError::Configuration(err.to_string()),
            // Upstream details stay in the server log.
            RelayError::Upstream { .. }
            | RelayError::Transport(_)
            | RelayError::InvalidResponse(_) => {
                ApiError::Upstream("Upstream generation request failed".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(resp: Response) -> ErrorBody {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_relay_error_display() {
        assert_eq!(RelayError::MissingApiKey.to_string(), "Missing API Key");
        let err = RelayError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "upstream returned 503: overloaded");
        assert_eq!(
            RelayError::Transport("timed out".to_string()).to_string(),
            "upstream request failed: timed out"
        );
    }

    #[tokio::test]
    async fn test_missing_key_maps_to_500() {
        let resp = ApiError::from(RelayError::MissingApiKey).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(resp).await.error, "Missing API Key");
    }

    #[tokio::test]
    async fn test_upstream_details_not_exposed() {
        let resp = ApiError::from(RelayError::Upstream {
            status: 400,
            body: "API key not valid".to_string(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert_eq!(body.error, "Upstream generation request failed");
        assert!(!body.error.contains("API key"));
    }

    #[tokio::test]
    async fn test_rejected_keeps_status() {
        let resp =
            ApiError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_of(resp).await.error, "too big");
    }

    #[tokio::test]
    async fn test_too_many_requests() {
        let resp = ApiError::TooManyRequests("slow down".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
