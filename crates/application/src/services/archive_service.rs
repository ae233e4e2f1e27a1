//! Archive query service
//!
//! Orchestrates validated archive queries against the weather archive port.

use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use domain::{
    DomainError,
    value_objects::{ArchivePeriod, GeoLocation},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{WeatherArchivePort, WeatherSeries},
};

/// A single temperature at the sampled instant closest to a requested time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// Latitude of the center of the grid cell used for measurement
    pub latitude: f64,
    /// Longitude of the center of the grid cell used for measurement
    pub longitude: f64,
    /// Timestamp of the measurement (UTC)
    pub measured_at: DateTime<Utc>,
    /// Measured temperature in Celsius
    pub temperature: f64,
}

/// Service answering historical weather queries
///
/// Stateless: each call validates its input, performs one fetch through the
/// archive port, and translates the result. Nothing is cached or retried.
pub struct ArchiveService {
    archive: Arc<dyn WeatherArchivePort>,
}

impl std::fmt::Debug for ArchiveService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveService")
            .field("archive", &"<WeatherArchivePort>")
            .finish()
    }
}

impl ArchiveService {
    /// Create a new service over the given archive port
    #[must_use]
    pub fn new(archive: Arc<dyn WeatherArchivePort>) -> Self {
        Self { archive }
    }

    /// Get hourly samples for a location over a date range
    ///
    /// An optional `hour` (0-23) restricts the result to one sample per day.
    /// Returned samples are strictly increasing by timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` for an out-of-range hour, or
    /// whatever the archive port reports.
    #[instrument(skip(self), fields(location = %location, period = %period))]
    pub async fn hourly(
        &self,
        location: &GeoLocation,
        period: &ArchivePeriod,
        hour: Option<u8>,
    ) -> Result<WeatherSeries, ApplicationError> {
        if let Some(h) = hour {
            if h > 23 {
                return Err(DomainError::InvalidHour(h).into());
            }
        }

        let mut series = self.archive.fetch_hourly(location, period).await?;

        if let Some(h) = hour {
            series.samples.retain(|s| s.time.hour() == u32::from(h));
        }

        // Callers rely on strictly increasing timestamps; the upstream order
        // is not trusted.
        series.samples.sort_unstable_by_key(|s| s.time);
        series.samples.dedup_by_key(|s| s.time);

        debug!(samples = series.samples.len(), "Resolved hourly archive query");
        Ok(series)
    }

    /// Get the temperature measured closest to a requested instant
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` when the covering day holds no
    /// samples, or whatever the archive port reports.
    #[instrument(skip(self), fields(location = %location, at = %at))]
    pub async fn temperature_at(
        &self,
        location: &GeoLocation,
        at: DateTime<Utc>,
    ) -> Result<TemperatureReading, ApplicationError> {
        let period = ArchivePeriod::single(at.date_naive());
        let series = self.archive.fetch_hourly(location, &period).await?;

        let Some(sample) = series.samples.iter().min_by_key(|s| (s.time - at).abs()) else {
            return Err(ApplicationError::NotFound(format!(
                "No temperature found for {at}"
            )));
        };

        Ok(TemperatureReading {
            latitude: series.latitude,
            longitude: series.longitude,
            measured_at: sample.time,
            temperature: sample.temperature,
        })
    }

    /// Check if the upstream archive is reachable
    pub async fn is_available(&self) -> bool {
        self.archive.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockWeatherArchivePort, WeatherSample};
    use chrono::NaiveDate;

    fn berlin() -> GeoLocation {
        GeoLocation::berlin()
    }

    fn period() -> ArchivePeriod {
        ArchivePeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap()
    }

    fn sample(time: &str, temperature: f64) -> WeatherSample {
        WeatherSample {
            time: time.parse().expect("valid timestamp"),
            temperature,
            precipitation: Some(0.0),
        }
    }

    fn series(samples: Vec<WeatherSample>) -> WeatherSeries {
        WeatherSeries {
            latitude: 52.52,
            longitude: 13.405,
            samples,
        }
    }

    #[tokio::test]
    async fn hourly_orders_samples_by_timestamp() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().returning(|_, _| {
            Ok(series(vec![
                sample("2024-01-02T00:00:00Z", 3.0),
                sample("2024-01-01T00:00:00Z", 2.5),
                sample("2024-01-01T12:00:00Z", 4.1),
            ]))
        });

        let service = ArchiveService::new(Arc::new(port));
        let result = service.hourly(&berlin(), &period(), None).await.unwrap();

        let times: Vec<_> = result.samples.iter().map(|s| s.time).collect();
        assert_eq!(times.len(), 3);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn hourly_drops_duplicate_timestamps() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().returning(|_, _| {
            Ok(series(vec![
                sample("2024-01-01T00:00:00Z", 2.5),
                sample("2024-01-01T00:00:00Z", 2.5),
                sample("2024-01-01T01:00:00Z", 2.1),
            ]))
        });

        let service = ArchiveService::new(Arc::new(port));
        let result = service.hourly(&berlin(), &period(), None).await.unwrap();

        assert_eq!(result.samples.len(), 2);
    }

    #[tokio::test]
    async fn hourly_filters_to_requested_hour() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().returning(|_, _| {
            Ok(series(vec![
                sample("2024-01-01T11:00:00Z", 2.5),
                sample("2024-01-01T12:00:00Z", 4.1),
                sample("2024-01-02T12:00:00Z", 3.8),
                sample("2024-01-02T13:00:00Z", 3.2),
            ]))
        });

        let service = ArchiveService::new(Arc::new(port));
        let result = service.hourly(&berlin(), &period(), Some(12)).await.unwrap();

        assert_eq!(result.samples.len(), 2);
        assert!((result.samples[0].temperature - 4.1).abs() < f64::EPSILON);
        assert!((result.samples[1].temperature - 3.8).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn hourly_rejects_out_of_range_hour_before_fetching() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().never();

        let service = ArchiveService::new(Arc::new(port));
        let result = service.hourly(&berlin(), &period(), Some(24)).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::InvalidHour(24)))
        ));
    }

    #[tokio::test]
    async fn hourly_propagates_upstream_errors() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly()
            .returning(|_, _| Err(ApplicationError::UpstreamUnavailable("HTTP 503".into())));

        let service = ArchiveService::new(Arc::new(port));
        let result = service.hourly(&berlin(), &period(), None).await;

        assert!(matches!(
            result,
            Err(ApplicationError::UpstreamUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn temperature_at_picks_closest_sample() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().returning(|_, _| {
            Ok(series(vec![
                sample("2024-01-01T11:00:00Z", 2.5),
                sample("2024-01-01T12:00:00Z", 4.1),
                sample("2024-01-01T13:00:00Z", 3.8),
            ]))
        });

        let service = ArchiveService::new(Arc::new(port));
        let at = "2024-01-01T12:20:00Z".parse().unwrap();
        let reading = service.temperature_at(&berlin(), at).await.unwrap();

        assert!((reading.temperature - 4.1).abs() < f64::EPSILON);
        assert_eq!(
            reading.measured_at,
            "2024-01-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[tokio::test]
    async fn temperature_at_queries_single_day() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly()
            .withf(|_, period| period.days() == 1 && period.start() == period.end())
            .returning(|_, _| Ok(series(vec![sample("2024-01-01T12:00:00Z", 4.1)])));

        let service = ArchiveService::new(Arc::new(port));
        let at = "2024-01-01T12:20:00Z".parse().unwrap();
        let reading = service.temperature_at(&berlin(), at).await.unwrap();

        assert!((reading.latitude - 52.52).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn temperature_at_empty_series_is_not_found() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_fetch_hourly().returning(|_, _| Ok(series(vec![])));

        let service = ArchiveService::new(Arc::new(port));
        let at = "2024-01-01T12:20:00Z".parse().unwrap();
        let result = service.temperature_at(&berlin(), at).await;

        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn is_available_delegates_to_port() {
        let mut port = MockWeatherArchivePort::new();
        port.expect_is_available().returning(|| false);

        let service = ArchiveService::new(Arc::new(port));
        assert!(!service.is_available().await);
    }

    #[test]
    fn service_has_debug() {
        let port = MockWeatherArchivePort::new();
        let service = ArchiveService::new(Arc::new(port));
        let debug = format!("{service:?}");
        assert!(debug.contains("ArchiveService"));
    }
}
