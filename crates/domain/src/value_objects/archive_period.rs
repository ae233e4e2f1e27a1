//! Inclusive date range value object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// An inclusive range of calendar dates for an archive query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivePeriod {
    /// First date of the range
    start: NaiveDate,
    /// Last date of the range
    end: NaiveDate,
}

impl ArchivePeriod {
    /// Create a new period with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Create a single-day period
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Get the first date of the range
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Get the last date of the range
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered by the range
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check whether a date falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for ArchivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
