//! Error handling for the backend API

use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::vision::VisionError;
use woordjes_core::ValidationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Too many requests: at most {limit} uploads per {window_secs}s")]
    TooManyRequests {
        limit: usize,
        window_secs: u64,
        retry_after_secs: u64,
    },

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Vision model error: {0}")]
    Vision(#[from] VisionError),

    #[error("Unusable model output: {message}")]
    Upstream {
        message: String,
        raw: Option<String>,
    },
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiError::TooManyRequests { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, "too_many_requests")
            }
            ApiError::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "not_configured"),
            ApiError::Vision(_) => (StatusCode::BAD_GATEWAY, "vision_error"),
            ApiError::Upstream { .. } => (StatusCode::BAD_GATEWAY, "upstream_error"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let retry_after = match &self {
            ApiError::TooManyRequests {
                retry_after_secs, ..
            } => HeaderValue::from_str(&retry_after_secs.to_string()).ok(),
            _ => None,
        };
        let raw = match &self {
            ApiError::Upstream { raw, .. } => raw.clone(),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            raw,
        });

        let mut response = (status, body).into_response();
        if let Some(value) = retry_after {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
        response
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
