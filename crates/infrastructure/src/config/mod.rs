//! Application configuration
//!
//! Defaults first, then an optional `config.toml`, then environment
//! variables with the `METEOGATE` prefix (e.g. `METEOGATE_SERVER_PORT`).

mod server;

use integration_weather::ArchiveConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use server::ServerConfig;

/// Application environment (development or production)
///
/// Controls whether internal error details are exposed in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details exposed
    #[default]
    Development,
    /// Production environment - sanitized error responses
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather archive client configuration
    #[serde(default)]
    pub weather: ArchiveConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` when the file or environment
    /// overrides cannot be parsed into the expected shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("weather.base_url", "https://archive-api.open-meteo.com/v1")?
            .set_default("weather.timeout_secs", 10)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., METEOGATE_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("METEOGATE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Check whether internal error details should be exposed to callers
    #[must_use]
    pub fn expose_internal_errors(&self) -> bool {
        self.environment != Environment::Production
    }
}
