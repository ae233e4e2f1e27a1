//! Weather archive handlers
//!
//! Endpoints answering historical temperature and precipitation queries.

use application::ports::{WeatherSample, WeatherSeries};
use application::services::TemperatureReading;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use domain::value_objects::{ArchivePeriod, GeoLocation};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, state::AppState};

/// Query parameters for the hourly series endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HourlyQuery {
    /// Latitude (-90 to 90)
    pub latitude: f64,
    /// Longitude (-180 to 180)
    pub longitude: f64,
    /// First date of the range (defaults to the end date, or today)
    pub start_date: Option<NaiveDate>,
    /// Last date of the range (defaults to the start date, or today)
    pub end_date: Option<NaiveDate>,
    /// Restrict samples to one hour of the day (0-23)
    pub hour: Option<u8>,
}

/// A single sample in an hourly series response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SampleData {
    /// Measurement timestamp (UTC)
    pub time: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Precipitation in mm, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

impl From<WeatherSample> for SampleData {
    fn from(sample: WeatherSample) -> Self {
        Self {
            time: sample.time,
            temperature: sample.temperature,
            precipitation: sample.precipitation,
        }
    }
}

/// Hourly series response
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "latitude": 52.52,
    "longitude": 13.419998,
    "samples": [
        {"time": "2024-01-01T00:00:00Z", "temperature": 2.5, "precipitation": 0.0},
        {"time": "2024-01-01T01:00:00Z", "temperature": 2.1, "precipitation": 0.2}
    ]
}))]
pub struct HourlyResponse {
    /// Latitude of the center of the grid cell used for measurement
    pub latitude: f64,
    /// Longitude of the center of the grid cell used for measurement
    pub longitude: f64,
    /// Samples ordered by timestamp ascending
    pub samples: Vec<SampleData>,
}

impl From<WeatherSeries> for HourlyResponse {
    fn from(series: WeatherSeries) -> Self {
        Self {
            latitude: series.latitude,
            longitude: series.longitude,
            samples: series.samples.into_iter().map(SampleData::from).collect(),
        }
    }
}

/// Get hourly temperature and precipitation for a location and date range
#[utoipa::path(
    get,
    path = "/v1/archive/hourly",
    tag = "archive",
    params(HourlyQuery),
    responses(
        (status = 200, description = "Hourly series", body = HourlyResponse),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse),
        (status = 502, description = "Unexpected upstream response", body = crate::error::ErrorResponse),
        (status = 503, description = "Upstream unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, query), fields(lat = query.latitude, lon = query.longitude))]
pub async fn hourly(
    State(state): State<AppState>,
    Query(query): Query<HourlyQuery>,
) -> Result<Json<HourlyResponse>, ApiError> {
    let location = GeoLocation::new(query.latitude, query.longitude)?;
    let period = resolve_period(query.start_date, query.end_date)?;

    let series = state
        .archive_service
        .hourly(&location, &period, query.hour)
        .await?;

    Ok(Json(HourlyResponse::from(series)))
}

/// Query parameters for the single-temperature endpoint
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemperatureQuery {
    /// Latitude (-90 to 90)
    pub latitude: f64,
    /// Longitude (-180 to 180)
    pub longitude: f64,
    /// Instant to look up (naive timestamps are treated as UTC)
    pub date_and_time: NaiveDateTime,
}

/// Single temperature response
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "latitude": 52.52,
    "longitude": 13.419998,
    "measured_at": "2024-01-01T12:00:00Z",
    "temperature": 4.1
}))]
pub struct TemperatureResponse {
    /// Latitude of the center of the grid cell used for measurement
    pub latitude: f64,
    /// Longitude of the center of the grid cell used for measurement
    pub longitude: f64,
    /// Timestamp of the measurement (UTC)
    pub measured_at: DateTime<Utc>,
    /// Measured temperature in Celsius
    pub temperature: f64,
}

impl From<TemperatureReading> for TemperatureResponse {
    fn from(reading: TemperatureReading) -> Self {
        Self {
            latitude: reading.latitude,
            longitude: reading.longitude,
            measured_at: reading.measured_at,
            temperature: reading.temperature,
        }
    }
}

/// Get the temperature measured closest to a requested instant
#[utoipa::path(
    get,
    path = "/v1/archive/temperature",
    tag = "archive",
    params(TemperatureQuery),
    responses(
        (status = 200, description = "Closest temperature reading", body = TemperatureResponse),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse),
        (status = 404, description = "No measurement for the requested instant", body = crate::error::ErrorResponse),
        (status = 502, description = "Unexpected upstream response", body = crate::error::ErrorResponse),
        (status = 503, description = "Upstream unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, query), fields(lat = query.latitude, lon = query.longitude))]
pub async fn temperature(
    State(state): State<AppState>,
    Query(query): Query<TemperatureQuery>,
) -> Result<Json<TemperatureResponse>, ApiError> {
    let location = GeoLocation::new(query.latitude, query.longitude)?;
    let at = Utc.from_utc_datetime(&query.date_and_time);

    let reading = state.archive_service.temperature_at(&location, at).await?;

    Ok(Json(TemperatureResponse::from(reading)))
}

/// Resolve optional date bounds into a validated period
///
/// A missing bound mirrors the other; with both missing the period covers
/// the current UTC date.
fn resolve_period(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<ArchivePeriod, ApiError> {
    let period = match (start_date, end_date) {
        (Some(start), Some(end)) => ArchivePeriod::new(start, end)?,
        (Some(date), None) | (None, Some(date)) => ArchivePeriod::single(date),
        (None, None) => ArchivePeriod::single(Utc::now().date_naive()),
    };
    Ok(period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn resolve_period_with_both_bounds() {
        let period = resolve_period(Some(date(2024, 1, 1)), Some(date(2024, 1, 2)))
            .expect("valid period");
        assert_eq!(period.start(), date(2024, 1, 1));
        assert_eq!(period.end(), date(2024, 1, 2));
    }

    #[test]
    fn resolve_period_rejects_inverted_bounds() {
        let result = resolve_period(Some(date(2024, 1, 2)), Some(date(2024, 1, 1)));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn resolve_period_mirrors_missing_bound() {
        let period = resolve_period(Some(date(2024, 1, 1)), None).expect("valid period");
        assert_eq!(period.start(), period.end());

        let period = resolve_period(None, Some(date(2024, 1, 2))).expect("valid period");
        assert_eq!(period.start(), date(2024, 1, 2));
    }

    #[test]
    fn resolve_period_defaults_to_today() {
        let period = resolve_period(None, None).expect("valid period");
        assert_eq!(period.start(), Utc::now().date_naive());
        assert_eq!(period.days(), 1);
    }

    #[test]
    fn hourly_response_from_series() {
        let series = WeatherSeries {
            latitude: 52.52,
            longitude: 13.42,
            samples: vec![WeatherSample {
                time: "2024-01-01T00:00:00Z".parse().expect("valid timestamp"),
                temperature: 2.5,
                precipitation: None,
            }],
        };

        let response = HourlyResponse::from(series);
        assert_eq!(response.samples.len(), 1);
        assert!((response.samples[0].temperature - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn sample_data_serialization_skips_missing_precipitation() {
        let sample = SampleData {
            time: "2024-01-01T00:00:00Z".parse().expect("valid timestamp"),
            temperature: 2.5,
            precipitation: None,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(!json.contains("precipitation"));
    }

    #[test]
    fn temperature_response_from_reading() {
        let reading = TemperatureReading {
            latitude: 52.52,
            longitude: 13.42,
            measured_at: "2024-01-01T12:00:00Z".parse().expect("valid timestamp"),
            temperature: 4.1,
        };

        let response = TemperatureResponse::from(reading);
        assert!((response.temperature - 4.1).abs() < f64::EPSILON);
        assert_eq!(response.measured_at, reading.measured_at);
    }
}
