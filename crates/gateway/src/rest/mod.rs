//! REST API endpoints.

pub mod auth;
pub mod health;
pub mod member;
pub mod waitlist;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::GatewayState;

/// Create all REST routes
pub fn create_rest_routes() -> Router<GatewayState> {
    Router::new()
        .nest("/api/v1/auth", auth::create_auth_routes())
        .nest("/api/v1/members", member::create_member_routes())
        .nest("/api/v1/waitlist", waitlist::create_waitlist_routes())
        .route("/health", get(health::health_check))
}

/// Unwrap a JSON body, turning deserialization failures into an enveloped
/// `invalid_request` instead of axum's plain-text rejection.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::invalid_request(rejection.body_text())),
    }
}

/// Same treatment for query-string parameters.
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    match params {
        Ok(Query(value)) => Ok(value),
        Err(rejection) => Err(ApiError::invalid_request(rejection.body_text())),
    }
}
