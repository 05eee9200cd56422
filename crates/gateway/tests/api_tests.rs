use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rangeclub_auth::Authenticator;
use rangeclub_config::{AuthConfig, MembershipConfig};
use rangeclub_gateway::{create_router, GatewayState};
use rangeclub_membership::{MemberService, WaitlistService};
use rangeclub_registry::{
    AdminRepository, CredentialRepository, MemberRepository, SessionRepository, WaitlistRepository,
};

async fn build_app(member_cap: usize, waitlist_cap: usize) -> Router {
    let members = MemberRepository::new(member_cap);
    let waitlist = WaitlistRepository::new(waitlist_cap);
    let credentials = CredentialRepository::new();
    let sessions = SessionRepository::new();
    let admins = AdminRepository::new();

    let auth_config = AuthConfig::default();
    let membership_config = MembershipConfig {
        active_members_max: member_cap,
        waitlist_max: waitlist_cap,
        ..MembershipConfig::default()
    };

    let authenticator = Arc::new(Authenticator::new(
        credentials,
        sessions,
        members.clone(),
        waitlist.clone(),
        admins,
        &auth_config,
    ));
    authenticator
        .bootstrap_admin("root@club.test", "Sup3r-secret")
        .await
        .expect("bootstrap admin");

    let member_service = Arc::new(MemberService::new(members.clone(), &membership_config));
    let waitlist_service = Arc::new(WaitlistService::new(
        waitlist,
        members,
        &membership_config,
    ));

    create_router(GatewayState::new(
        authenticator,
        member_service,
        waitlist_service,
    ))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("request runs");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn registration(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Str0ng-pass",
        "confirmPassword": "Str0ng-pass",
        "firstName": "Alex",
        "lastName": "Hunter",
    })
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "root@club.test", "password": "Sup3r-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = build_app(10, 10).await;
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn registration_returns_the_envelope_with_a_bearer_token() {
    let app = build_app(10, 10).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("alice@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert!(body["timestamp"].is_string());
    assert_eq!(body["data"]["user"]["role"], "member");
    assert_eq!(body["data"]["user"]["firstName"], "Alex");
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["expiresAt"].is_string());
}

#[tokio::test]
async fn weak_passwords_fail_with_the_policy_details() {
    let app = build_app(10, 10).await;

    let mut payload = registration("alice@example.com");
    payload["password"] = json!("weakpass");
    payload["confirmPassword"] = json!("weakpass");

    let (status, body) = call(&app, Method::POST, "/api/v1/auth/register", None, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "invalid_password");
    assert_eq!(body["error"]["details"]["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn login_failures_are_constant_shape() {
    let app = build_app(10, 10).await;

    for (email, password) in [
        ("nobody@example.com", "Str0ng-pass"),
        ("root@club.test", "Wr0ng-pass!"),
    ] {
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "invalid_credentials");
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn member_listing_walks_the_authz_ladder() {
    let app = build_app(10, 10).await;

    let (status, body) = call(&app, Method::GET, "/api/v1/members", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");

    let (status, body) = call(&app, Method::GET, "/api/v1/members", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");

    let (_, registered) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("member@example.com")),
    )
    .await;
    let member_token = registered["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::GET, "/api/v1/members", Some(&member_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let token = admin_token(&app).await;
    let (status, body) = call(&app, Method::GET, "/api/v1/members", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["limit"], 20);
}

#[tokio::test]
async fn self_service_update_keeps_the_stored_email() {
    let app = build_app(10, 10).await;

    let (_, registered) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("own@example.com")),
    )
    .await;
    let member_id = registered["data"]["user"]["id"].as_str().unwrap().to_string();
    let member_token = registered["data"]["token"].as_str().unwrap().to_string();

    let payload = json!({ "email": "stolen@example.com", "bio": "Skeet regular" });

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/members/{member_id}"),
        Some(&member_token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "own@example.com");
    assert_eq!(body["data"]["bio"], "Skeet regular");

    let token = admin_token(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/members/{member_id}"),
        Some(&token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "stolen@example.com");
}

#[tokio::test]
async fn waitlist_application_and_approval_round_trip() {
    let app = build_app(10, 10).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/waitlist",
        None,
        Some(json!({
            "email": "hopeful@example.com",
            "firstName": "Hope",
            "lastName": "Fullest",
            "reasonForJoining": "heard about the 600 yard range",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["position"], 1);
    assert_eq!(body["data"]["status"], "pending");
    let entry_id = body["data"]["id"].as_str().unwrap().to_string();

    let token = admin_token(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/waitlist/{entry_id}"),
        Some(&token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["meta"]["moved"], true);
    assert_eq!(body["meta"]["from"], "waitlist");
    assert_eq!(body["data"]["email"], "hopeful@example.com");
    assert_eq!(body["data"]["status"], "active");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/waitlist?status=approved",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);

    // A second approval attempt conflicts with the terminal state.
    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/v1/waitlist/{entry_id}"),
        Some(&token),
        Some(json!({ "status": "rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "invalid_transition");
}

#[tokio::test]
async fn logout_is_idempotent_over_http() {
    let app = build_app(10, 10).await;
    let token = admin_token(&app).await;

    let (status, body) = call(&app, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["loggedOut"], true);
    assert_eq!(body["data"]["sessionTerminated"], true);

    let (status, body) = call(&app, Method::POST, "/api/v1/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sessionTerminated"], false);

    let (status, _) = call(&app, Method::POST, "/api/v1/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_rotates_tokens_over_http() {
    let app = build_app(10, 10).await;
    let token = admin_token(&app).await;

    let (status, body) = call(&app, Method::POST, "/api/v1/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let new_token = body["data"]["token"].as_str().unwrap().to_string();
    assert_ne!(new_token, token);

    let (status, body) = call(&app, Method::POST, "/api/v1/auth/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");

    let (status, _) = call(&app, Method::GET, "/api/v1/members", Some(&new_token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registration_overflows_into_the_waitlist_at_member_capacity() {
    let app = build_app(1, 10).await;

    let (_, first) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("one@example.com")),
    )
    .await;
    assert_eq!(first["data"]["user"]["role"], "member");

    let (status, second) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(registration("two@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["data"]["user"]["role"], "waitlist");
}

#[tokio::test]
async fn malformed_json_bodies_are_enveloped_as_invalid_request() {
    let app = build_app(10, 10).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn admin_registration_is_privileged() {
    let app = build_app(10, 10).await;

    let payload = json!({
        "email": "newadmin@example.com",
        "password": "Str0ng-pass",
        "confirmPassword": "Str0ng-pass",
        "firstName": "New",
        "lastName": "Admin",
        "adminRole": "membership_admin",
    });

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register-admin",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");

    let token = admin_token(&app).await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register-admin",
        Some(&token),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["created"], true);
    assert_eq!(body["data"]["adminRole"], "membership_admin");
    // No session is minted for the new admin.
    assert!(body["data"].get("token").is_none());
}
