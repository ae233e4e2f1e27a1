//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the Meteogate HTTP API.
//! Includes Swagger UI for interactive API exploration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for Meteogate
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Meteogate API",
        version = "0.1.0",
        description = "Historical weather query API backed by the Open-Meteo archive",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check and readiness endpoints"),
        (name = "archive", description = "Historical temperature and precipitation queries")
    ),
    paths(
        // Health endpoints
        handlers::health::health_check,
        handlers::health::readiness_check,
        // Archive endpoints
        handlers::archive::hourly,
        handlers::archive::temperature,
    ),
    components(
        schemas(
            // Health schemas
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ServiceStatus,
            // Archive schemas
            handlers::archive::HourlyResponse,
            handlers::archive::SampleData,
            handlers::archive::TemperatureResponse,
            // Error schemas
            crate::error::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Router serving the interactive API documentation
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification (used by Swagger UI)
/// - `/docs` - Swagger UI interactive documentation
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
