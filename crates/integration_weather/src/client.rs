//! Open-Meteo archive client
//!
//! HTTP client for the Open-Meteo Historical Weather API.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, HourlyData, HourlySample, HourlySeries};

/// Weather archive client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather archive client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Open-Meteo archive API base URL
    /// (default: <https://archive-api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client trait for fetching archived weather data
#[async_trait]
pub trait ArchiveClient: Send + Sync {
    /// Get hourly samples for a location over an inclusive date range
    async fn get_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HourlySeries, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: ArchiveConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: ArchiveConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(ArchiveConfig::default())
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for an archive request
    fn build_archive_url(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> String {
        format!(
            "{}/archive?latitude={}&longitude={}&start_date={}&end_date={}&hourly={}",
            self.config.base_url,
            latitude,
            longitude,
            start_date.format("%Y-%m-%d"),
            end_date.format("%Y-%m-%d"),
            "temperature_2m,precipitation",
        )
    }

    /// Map a transport error from reqwest into a `WeatherError`
    fn map_send_error(&self, err: &reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            WeatherError::ConnectionFailed(err.to_string())
        } else {
            WeatherError::RequestFailed(err.to_string())
        }
    }

    /// Parse hourly samples from the API response
    ///
    /// The upstream reports parallel arrays; hours with a null temperature
    /// carry no measurement and are dropped.
    fn parse_series(response: ApiResponse) -> Result<HourlySeries, WeatherError> {
        let hourly: HourlyData = response
            .hourly
            .ok_or_else(|| WeatherError::ParseError("No hourly data in response".to_string()))?;

        if hourly.temperature_2m.len() != hourly.time.len() {
            return Err(WeatherError::ParseError(format!(
                "Mismatched hourly arrays: {} timestamps, {} temperatures",
                hourly.time.len(),
                hourly.temperature_2m.len()
            )));
        }
        if let Some(precipitation) = &hourly.precipitation {
            if precipitation.len() != hourly.time.len() {
                return Err(WeatherError::ParseError(format!(
                    "Mismatched hourly arrays: {} timestamps, {} precipitation values",
                    hourly.time.len(),
                    precipitation.len()
                )));
            }
        }

        let mut samples = Vec::with_capacity(hourly.time.len());
        for (i, raw_time) in hourly.time.iter().enumerate() {
            let Some(temperature) = hourly.temperature_2m[i] else {
                continue;
            };
            let time = Self::parse_datetime(raw_time)?;
            let precipitation = hourly
                .precipitation
                .as_ref()
                .and_then(|p| p.get(i).copied().flatten());

            samples.push(HourlySample {
                time,
                temperature,
                precipitation,
            });
        }

        Ok(HourlySeries {
            latitude: response.latitude,
            longitude: response.longitude,
            samples,
        })
    }

    /// Parse datetime string to `DateTime<Utc>`
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, WeatherError> {
        // Try ISO 8601 format first (2024-01-01T14:00)
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        // Try with seconds
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        // Try RFC 3339
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }
}

#[async_trait]
impl ArchiveClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, start = %start_date, end = %end_date))]
    async fn get_hourly(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HourlySeries, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_archive_url(latitude, longitude, start_date, end_date);
        debug!(url = %url, "Fetching hourly archive data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        Self::parse_series(api_response)
    }

    async fn is_healthy(&self) -> bool {
        // Single-day probe using Berlin coordinates. The archive lags behind
        // realtime, so ask for a date comfortably in the past.
        let date = Utc::now().date_naive() - Days::new(7);
        self.get_hourly(52.52, 13.405, date, date).await.is_ok()
    }
}
