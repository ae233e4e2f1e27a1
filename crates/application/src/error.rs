//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Upstream weather service could not be reached or answered with a
    /// failure status
    #[error("Upstream weather service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream weather service answered with a body that does not match
    /// the expected shape
    #[error("Unexpected upstream response: {0}")]
    UpstreamFormat(String),

    /// Requested data does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error was caused by the caller's input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::NotFound(_))
    }
}
