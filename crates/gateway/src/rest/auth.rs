//! Authentication REST endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};

use rangeclub_auth::{AdminRegistrationRequest, LoginRequest, RegistrationRequest};

use crate::envelope::success;
use crate::error::{ApiError, ApiResult};
use crate::middleware::bearer_token;
use crate::rest::json_body;
use crate::state::GatewayState;

/// Create authentication routes
pub fn create_auth_routes() -> Router<GatewayState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/register-admin", post(register_admin))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

/// Public registration. Lands the account in the member registry while there
/// is room, on the waitlist after that.
pub async fn register(
    State(state): State<GatewayState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = json_body(payload)?;
    let auth = state.authenticator().register(request).await?;
    Ok(success(StatusCode::CREATED, &auth))
}

pub async fn login(
    State(state): State<GatewayState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = json_body(payload)?;
    let auth = state.authenticator().login(request).await?;
    Ok(success(StatusCode::OK, &auth))
}

/// Privileged creation of admin accounts.
pub async fn register_admin(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    payload: Result<Json<AdminRegistrationRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = json_body(payload)?;
    let created = state
        .authenticator()
        .register_admin(bearer_token(&headers), request)
        .await?;
    Ok(success(StatusCode::CREATED, &created))
}

pub async fn refresh(
    State(state): State<GatewayState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let auth = state
        .authenticator()
        .refresh(bearer_token(&headers))
        .await?;
    Ok(success(StatusCode::OK, &auth))
}

/// Idempotent logout; repeated calls with a dead token still succeed.
pub async fn logout(State(state): State<GatewayState>, headers: HeaderMap) -> ApiResult<Response> {
    let token = bearer_token(&headers).ok_or_else(ApiError::invalid_token)?;
    let outcome = state.authenticator().logout(token).await;
    Ok(success(StatusCode::OK, &outcome))
}
