//! API error handling
//!
//! Provides sanitized error responses that don't leak implementation details.
//! In production mode, internal errors return generic messages without details.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use utoipa::ToSchema;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// In production environments, this should be set to `false` to prevent
/// leaking implementation details or sensitive information.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Sanitize an error message to remove potentially sensitive information
///
/// Messages containing file paths, URLs, or connection details are replaced
/// with a generic message when detail exposure is off.
fn sanitize_error_message(msg: &str) -> String {
    if should_expose_details() {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "\\Users\\",
        "C:\\",
        // Stack trace indicators
        "panicked at",
        ".rs:",
        // Connection details
        "connection refused",
        "ECONNREFUSED",
        "timeout",
    ];

    let msg_lower = msg.to_lowercase();
    for pattern in &sensitive_patterns {
        if msg_lower.contains(&pattern.to_lowercase()) {
            return "An error occurred processing your request".to_string();
        }
    }

    if msg.contains("://") {
        return "An error occurred processing your request".to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream format: {0}")]
    UpstreamFormat(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                sanitize_error_message(msg),
                None,
            ),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not_found",
                sanitize_error_message(msg),
                None,
            ),
            Self::UpstreamUnavailable(msg) => {
                // Dependency failures might leak backend details
                let sanitized = if should_expose_details() {
                    msg.clone()
                } else {
                    "Upstream weather service unavailable".to_string()
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "upstream_unavailable",
                    sanitized,
                    None,
                )
            },
            Self::UpstreamFormat(msg) => {
                let sanitized = if should_expose_details() {
                    msg.clone()
                } else {
                    "Upstream weather service returned an unexpected response".to_string()
                };
                (StatusCode::BAD_GATEWAY, "upstream_format", sanitized, None)
            },
            Self::Internal(msg) => {
                // Internal errors should never leak details in production
                let details = if should_expose_details() {
                    Some(msg.clone())
                } else {
                    None
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::UpstreamUnavailable(msg) => Self::UpstreamUnavailable(msg),
            ApplicationError::UpstreamFormat(msg) => Self::UpstreamFormat(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
