//! The uniform success envelope.
//!
//! Every endpoint responds with `{success, timestamp, statusCode, data}`;
//! errors use the mirror shape built by [`crate::error::ApiError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

pub fn success<T: Serialize>(status: StatusCode, data: &T) -> Response {
    let body = json!({
        "success": true,
        "timestamp": Utc::now().to_rfc3339(),
        "statusCode": status.as_u16(),
        "data": data,
    });
    (status, Json(body)).into_response()
}

pub fn success_with_meta<T: Serialize>(status: StatusCode, data: &T, meta: Value) -> Response {
    let body = json!({
        "success": true,
        "timestamp": Utc::now().to_rfc3339(),
        "statusCode": status.as_u16(),
        "data": data,
        "meta": meta,
    });
    (status, Json(body)).into_response()
}
