//! Weather archive port
//!
//! Defines the interface for historical weather data retrieval.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::{ArchivePeriod, GeoLocation};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A single hourly weather measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Measurement timestamp (UTC)
    pub time: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Precipitation in mm, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

/// Hourly weather measurements for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSeries {
    /// Latitude of the center of the grid cell used for measurement
    pub latitude: f64,
    /// Longitude of the center of the grid cell used for measurement
    pub longitude: f64,
    /// Hourly samples
    pub samples: Vec<WeatherSample>,
}

/// Port for historical weather retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherArchivePort: Send + Sync {
    /// Fetch hourly samples for a location over a date range
    ///
    /// Returns the samples as reported by the upstream; ordering is not
    /// guaranteed at this seam.
    async fn fetch_hourly(
        &self,
        location: &GeoLocation,
        period: &ArchivePeriod,
    ) -> Result<WeatherSeries, ApplicationError>;

    /// Check if the archive service is available
    async fn is_available(&self) -> bool;
}
