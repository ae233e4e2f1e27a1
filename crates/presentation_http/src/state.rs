//! Application state shared across handlers

use std::sync::Arc;

use application::ArchiveService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Archive query service
    pub archive_service: Arc<ArchiveService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("archive_service", &self.archive_service)
            .field("environment", &self.config.environment)
            .finish()
    }
}
