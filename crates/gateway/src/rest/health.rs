//! Liveness endpoint.

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;

use crate::envelope::success;

pub async fn health_check() -> Response {
    success(StatusCode::OK, &json!({ "status": "healthy" }))
}
