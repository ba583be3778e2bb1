//! # API Error Types
//!
//! Two ways a request can fail:
//!
//! - [`AppError`] for transport-level failures (unknown route targets,
//!   non-AJAX vote calls, store outages). Rendered with a non-2xx status and
//!   an [`ErrorBody`].
//! - [`VoteEnvelope::failure`] for the vote protocol's own rejections (not
//!   authenticated, bad direction, bad lookup, unknown object). These go out
//!   as HTTP 200 so AJAX callers can read `error_message` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use likes_core::Score;
use likes_store::StoreError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND").
    pub code: String,
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Path or query could not be parsed (422).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// A store could not be reached (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::ServiceUnavailable(_) => "A backing store is unavailable".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => Self::ServiceUnavailable(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

/// Response body of the vote endpoint.
///
/// Serializes either as `{"success": true, "score": {...}}` or as
/// `{"success": false, "error_message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VoteEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VoteEnvelope {
    pub fn success(score: Score) -> Self {
        Self {
            success: true,
            score: Some(score),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            score: None,
            error_message: Some(message.into()),
        }
    }
}

impl IntoResponse for VoteEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("missing object".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn bad_request_status_code() {
        let err = AppError::BadRequest("offset".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "BAD_REQUEST");
    }

    #[test]
    fn internal_message_is_not_leaked() {
        let response = AppError::Internal("dashmap shard poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_map_by_kind() {
        let unavailable: AppError = StoreError::Unavailable("redis down".to_string()).into();
        assert!(matches!(unavailable, AppError::ServiceUnavailable(_)));

        let ambiguous: AppError = StoreError::Ambiguous {
            kind: likes_core::ContentKind::Album,
            lookup: likes_core::Lookup::Slug {
                field: "slug".to_string(),
                value: "trip".to_string(),
            },
        }
        .into();
        assert!(matches!(ambiguous, AppError::Internal(_)));
    }

    #[test]
    fn envelope_shapes() {
        let ok = serde_json::to_value(VoteEnvelope::success(Score {
            score: 2,
            num_votes: 3,
        }))
        .unwrap();
        assert_eq!(
            ok,
            serde_json::json!({"success": true, "score": {"score": 2, "num_votes": 3}})
        );

        let failed = serde_json::to_value(VoteEnvelope::failure("Not authenticated.")).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"success": false, "error_message": "Not authenticated."})
        );
    }
}
