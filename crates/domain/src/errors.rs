//! Domain-level errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinates outside the valid geographic bounds
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Date range where the end precedes the start
    #[error("Invalid date range: {end} precedes {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Hour-of-day filter outside 0-23
    #[error("Invalid hour: {0} (must be 0-23)")]
    InvalidHour(u8),
}
