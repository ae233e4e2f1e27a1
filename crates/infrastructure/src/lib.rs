//! Infrastructure layer for Meteogate
//!
//! Contains configuration loading and the adapters that connect the
//! application ports to concrete integrations.

pub mod adapters;
pub mod config;

pub use adapters::ArchiveAdapter;
pub use config::{AppConfig, Environment, ServerConfig};
