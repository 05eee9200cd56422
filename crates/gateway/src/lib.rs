//! # Rangeclub Gateway Crate
//!
//! HTTP REST layer for the rangeclub backend. Routes requests to the auth and
//! membership services and renders every response in the uniform envelope
//! `{success, timestamp, statusCode, data | error}`.
//!
//! - **rest**: versioned API endpoints under `/api/v1`
//! - **state**: shared service handles
//! - **middleware**: bearer extraction, request logging, CORS
//! - **envelope / error**: the success and error halves of the wire format

pub mod envelope;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, Router};

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    Router::new()
        .merge(rest::create_rest_routes())
        .layer(middleware::create_cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state)
}
