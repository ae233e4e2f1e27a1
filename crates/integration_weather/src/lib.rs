//! Open-Meteo historical weather integration
//!
//! Client for the Open-Meteo Historical Weather API
//! (<https://open-meteo.com/en/docs/historical-weather-api>).
//! Provides hourly temperature and precipitation series without requiring
//! an API key.

pub mod client;
mod models;

pub use client::{ArchiveClient, ArchiveConfig, OpenMeteoClient, WeatherError};
pub use models::{HourlySample, HourlySeries};
