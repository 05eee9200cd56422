//! Waitlist REST endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;

use rangeclub_membership::{
    PageParams, UpdateWaitlistRequest, WaitlistApplicationRequest, WaitlistUpdateOutcome,
};

use crate::envelope::{success, success_with_meta};
use crate::error::ApiResult;
use crate::middleware::maybe_session;
use crate::rest::{json_body, query_params};
use crate::state::GatewayState;

/// Create waitlist routes
pub fn create_waitlist_routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(list_waitlist).post(apply))
        .route("/:id", patch(update_waitlist).delete(delete_waitlist))
}

pub async fn list_waitlist(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    let params = query_params(params)?;
    let page = state
        .waitlist_service()
        .list(session.as_ref(), &params)
        .await?;
    Ok(success(StatusCode::OK, &page))
}

/// Public application endpoint; no authentication required.
pub async fn apply(
    State(state): State<GatewayState>,
    payload: Result<Json<WaitlistApplicationRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = json_body(payload)?;
    let entry = state.waitlist_service().apply(request).await?;
    Ok(success(StatusCode::CREATED, &entry))
}

/// Update an application or change its status. Approval responds with the
/// newly created member and a meta block describing the move.
pub async fn update_waitlist(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<UpdateWaitlistRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    let request = json_body(payload)?;
    let outcome = state
        .waitlist_service()
        .update(session.as_ref(), &id, request)
        .await?;

    Ok(match outcome {
        WaitlistUpdateOutcome::Updated(entry) => success(StatusCode::OK, &entry),
        WaitlistUpdateOutcome::Approved(member) => success_with_meta(
            StatusCode::CREATED,
            &member,
            json!({ "moved": true, "from": "waitlist", "to": "member" }),
        ),
    })
}

pub async fn delete_waitlist(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let session = maybe_session(&state, &headers).await?;
    state
        .waitlist_service()
        .delete(session.as_ref(), &id)
        .await?;
    Ok(success(StatusCode::OK, &json!({ "id": id, "deleted": true })))
}
