//! Cross-cutting request plumbing: bearer extraction, session resolution,
//! request logging, CORS.

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

use rangeclub_registry::Session;

use crate::error::ApiResult;
use crate::state::GatewayState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Resolve the caller's session when a bearer token is present. A missing
/// header yields `None`; a token that is unknown or expired is a hard 401.
pub async fn maybe_session(
    state: &GatewayState,
    headers: &axum::http::HeaderMap,
) -> ApiResult<Option<Session>> {
    match bearer_token(headers) {
        None => Ok(None),
        Some(token) => {
            let session = state.authenticator().authenticate(token).await?;
            Ok(Some(session))
        }
    }
}

/// Log every request with its method, path, status, and latency.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}

/// Permissive CORS for the club frontend.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
