//! Weather archive data models
//!
//! Types for representing hourly data from the Open-Meteo archive API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Measurement timestamp (UTC)
    pub time: DateTime<Utc>,
    /// Air temperature at 2m in Celsius
    pub temperature: f64,
    /// Precipitation in mm, when reported
    pub precipitation: Option<f64>,
}

/// Hourly measurements for one location and period
///
/// Samples are in the order the upstream reported them; callers that need
/// a strict ordering guarantee sort at their own layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Latitude of the center of the grid cell used for measurement
    pub latitude: f64,
    /// Longitude of the center of the grid cell used for measurement
    pub longitude: f64,
    /// Hourly samples
    pub samples: Vec<HourlySample>,
}

impl HourlySeries {
    /// Number of samples in the series
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the series holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Raw hourly block from the API (parallel arrays)
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: Option<HourlyData>,
}
