//! Member management REST endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;

use rangeclub_membership::{CreateMemberRequest, PageParams};
use rangeclub_registry::MemberUpdate;

use crate::envelope::success;
use crate::error::ApiResult;
use crate::middleware::maybe_session;
use crate::rest::{json_body, query_params};
use crate::state::GatewayState;

/// Create member management routes
pub fn create_member_routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", patch(update_member).delete(delete_member))
}

pub async fn list_members(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    let params = query_params(params)?;
    let page = state.member_service().list(session.as_ref(), &params).await?;
    Ok(success(StatusCode::OK, &page))
}

pub async fn create_member(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    payload: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    let request = json_body(payload)?;
    let member = state
        .member_service()
        .create(session.as_ref(), request)
        .await?;
    Ok(success(StatusCode::CREATED, &member))
}

pub async fn update_member(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<MemberUpdate>, JsonRejection>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    let update = json_body(payload)?;
    let member = state
        .member_service()
        .update(session.as_ref(), &id, update)
        .await?;
    Ok(success(StatusCode::OK, &member))
}

pub async fn delete_member(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    state.member_service().delete(session.as_ref(), &id).await?;
    Ok(success(StatusCode::OK, &json!({ "id": id, "deleted": true })))
}
