//! Meteogate HTTP presentation layer
//!
//! This crate provides the HTTP API for the weather archive service.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::propagate_request_id;
pub use routes::create_router;
pub use state::AppState;
