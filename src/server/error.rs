//! HTTP error envelopes
//!
//! Every failure shape carries the request's correlation id in both the body
//! and the `x-correlation-id` response header, matching the success path.

use axum::Json;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::CORRELATION_HEADER;

// Client-closed-request; no named constant exists in http
const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

/// Error response for the order endpoints
#[derive(Debug)]
pub struct ApiError {
    pub correlation_id: Uuid,
    pub kind: ApiErrorKind,
}

#[derive(Debug)]
pub enum ApiErrorKind {
    /// Input failed validation or carried malformed arguments
    Validation(Vec<String>),
    /// The caller abandoned the request; no body is committed
    Cancelled,
    /// Anything else; detail stays server-side
    Internal,
}

impl ApiError {
    pub fn validation(correlation_id: Uuid, errors: Vec<String>) -> Self {
        Self {
            correlation_id,
            kind: ApiErrorKind::Validation(errors),
        }
    }

    pub fn cancelled(correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            kind: ApiErrorKind::Cancelled,
        }
    }

    pub fn internal(correlation_id: Uuid) -> Self {
        Self {
            correlation_id,
            kind: ApiErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ApiErrorKind::Validation(errors) => {
                write!(f, "validation failed: {}", errors.join("; "))
            }
            ApiErrorKind::Cancelled => write!(f, "request cancelled"),
            ApiErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError {
            correlation_id,
            kind,
        } = self;

        let mut response = match kind {
            ApiErrorKind::Validation(errors) => {
                let body = json!({
                    "errors": errors
                        .iter()
                        .map(|message| json!({ "message": message }))
                        .collect::<Vec<_>>(),
                    "correlationId": correlation_id,
                    "timestamp": Utc::now(),
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiErrorKind::Cancelled => StatusCode::from_u16(STATUS_CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            ApiErrorKind::Internal => {
                let body = json!({
                    "error": "An unexpected error occurred",
                    "correlationId": correlation_id,
                    "timestamp": Utc::now(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        };

        if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
            response.headers_mut().insert(CORRELATION_HEADER, value);
        }

        response
    }
}
