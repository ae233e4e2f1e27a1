//! Archive adapter - Implements `WeatherArchivePort` using `integration_weather`

use application::error::ApplicationError;
use application::ports::{WeatherArchivePort, WeatherSample, WeatherSeries};
use async_trait::async_trait;
use domain::value_objects::{ArchivePeriod, GeoLocation};
use integration_weather::{
    ArchiveClient, ArchiveConfig, HourlySeries, OpenMeteoClient, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the Open-Meteo historical weather API
pub struct ArchiveAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for ArchiveAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl ArchiveAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::with_defaults()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: ArchiveConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::Timeout(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::RateLimitExceeded => {
                ApplicationError::UpstreamUnavailable(err.to_string())
            },
            WeatherError::ParseError(e) => ApplicationError::UpstreamFormat(e),
            WeatherError::InvalidCoordinates => {
                domain::DomainError::InvalidCoordinates.into()
            },
        }
    }

    /// Convert an integration series into the application port shape
    fn map_series(series: HourlySeries) -> WeatherSeries {
        WeatherSeries {
            latitude: series.latitude,
            longitude: series.longitude,
            samples: series
                .samples
                .into_iter()
                .map(|s| WeatherSample {
                    time: s.time,
                    temperature: s.temperature,
                    precipitation: s.precipitation,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl WeatherArchivePort for ArchiveAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), period = %period))]
    async fn fetch_hourly(
        &self,
        location: &GeoLocation,
        period: &ArchivePeriod,
    ) -> Result<WeatherSeries, ApplicationError> {
        let result = self
            .client
            .get_hourly(
                location.latitude(),
                location.longitude(),
                period.start(),
                period.end(),
            )
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(series) => {
                debug!(samples = series.len(), "Retrieved hourly archive data");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get hourly archive data");
            },
        }

        result.map(Self::map_series)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
