//! Request-path error kinds.
//!
//! Internally each failure keeps its kind and detail for logs and metrics.
//! At the HTTP boundary client errors get a fixed 400 (or 413 for an
//! oversized body) and everything else a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Body message for a request missing `input` or `mode`.
pub const VALIDATION_MESSAGE: &str = "input and mode required";
/// Body message for a request body over the configured limit.
pub const TOO_LARGE_MESSAGE: &str = "request entity too large";
/// Body message for every server-side failure.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Errors that can occur while handling a chat request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Client input was missing or could not be parsed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The request body exceeded `security.max_body_size`.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// The webhook was unreachable, answered non-2xx, or sent an unreadable body.
    #[error("downstream error: {0}")]
    Downstream(String),

    /// The webhook did not answer within the configured deadline.
    #[error("downstream timed out after {0} seconds")]
    Timeout(u64),

    /// Anything not covered above.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl GatewayError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::PayloadTooLarge(_) => "payload_too_large",
            GatewayError::Downstream(_) => "downstream",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::Unknown(_) => "unknown",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            GatewayError::Unknown(err.to_string())
        } else {
            GatewayError::Downstream(err.to_string())
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            GatewayError::Validation(_) => VALIDATION_MESSAGE,
            GatewayError::PayloadTooLarge(_) => TOO_LARGE_MESSAGE,
            _ => INTERNAL_MESSAGE,
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: GatewayError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_fixed_400() {
        let (status, body) = body_of(GatewayError::Validation("mode missing".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "input and mode required" }));
    }

    #[tokio::test]
    async fn test_payload_too_large_maps_to_413() {
        let err = GatewayError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(err.kind(), "payload_too_large");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": "request entity too large" }));
    }

    #[tokio::test]
    async fn test_server_side_kinds_collapse_to_generic_500() {
        let errors = vec![
            GatewayError::Downstream("connection refused: 10.0.0.7:5678".into()),
            GatewayError::Timeout(60),
            GatewayError::Unknown("secret detail".into()),
        ];
        for err in errors {
            let (status, body) = body_of(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Internal server error" }));
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(GatewayError::Validation(String::new()).kind(), "validation");
        assert_eq!(GatewayError::Downstream(String::new()).kind(), "downstream");
        assert_eq!(GatewayError::Timeout(1).kind(), "timeout");
        assert_eq!(GatewayError::Unknown(String::new()).kind(), "unknown");
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = GatewayError::Timeout(60);
        assert_eq!(err.to_string(), "downstream timed out after 60 seconds");
    }
}
