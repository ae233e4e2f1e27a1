//! Route definitions

use axum::{Router, response::Redirect, routing::get};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Archive API (v1)
        .route("/v1/archive/hourly", get(handlers::archive::hourly))
        .route(
            "/v1/archive/temperature",
            get(handlers::archive::temperature),
        )
        // Interactive API documentation
        .merge(openapi::create_openapi_routes())
        .route("/", get(|| async { Redirect::permanent("/docs") }))
        // Attach state
        .with_state(state)
}
