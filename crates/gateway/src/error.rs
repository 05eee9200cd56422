//! Error type for the gateway layer.
//!
//! Every failure leaving the API is an [`ApiError`]: an HTTP status, a short
//! machine-readable code, a human message, and optional details, rendered in
//! the uniform response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use rangeclub_auth::AuthError;
use rangeclub_membership::MembershipError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }

    pub fn invalid_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "invalid_token", "Invalid token")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(details) = self.details {
            error["details"] = details;
        }

        let body = json!({
            "success": false,
            "timestamp": Utc::now().to_rfc3339(),
            "statusCode": self.status.as_u16(),
            "error": error,
        });

        (self.status, Json(body)).into_response()
    }
}

/// Result type for gateway handlers
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        let message = error.to_string();
        match error {
            AuthError::MissingFields => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message)
            }
            AuthError::InvalidEmail => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_email", message)
            }
            AuthError::PasswordMismatch => {
                ApiError::new(StatusCode::BAD_REQUEST, "password_mismatch", message)
            }
            AuthError::PasswordPolicy(errors) => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_password", message)
                    .with_details(json!({ "errors": errors }))
            }
            AuthError::EmailTaken => {
                ApiError::new(StatusCode::CONFLICT, "email_conflict", message)
            }
            AuthError::RegistrationClosed => {
                ApiError::new(StatusCode::CONFLICT, "registration_closed", message)
            }
            AuthError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, "invalid_credentials", message)
            }
            AuthError::SessionNotFound => {
                ApiError::new(StatusCode::UNAUTHORIZED, "invalid_token", message)
            }
            AuthError::SessionExpired => {
                ApiError::new(StatusCode::UNAUTHORIZED, "session_expired", message)
            }
            AuthError::Forbidden | AuthError::SuperAdminRequired => {
                ApiError::new(StatusCode::FORBIDDEN, "forbidden", message)
            }
            AuthError::UnknownAdminRole => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_role", message)
            }
            AuthError::PasswordHash(_) => ApiError::internal("Internal server error"),
        }
    }
}

impl From<MembershipError> for ApiError {
    fn from(error: MembershipError) -> Self {
        let message = error.to_string();
        match error {
            MembershipError::Unauthorized => {
                ApiError::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
            }
            MembershipError::Forbidden => {
                ApiError::new(StatusCode::FORBIDDEN, "forbidden", message)
            }
            MembershipError::MissingFields => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message)
            }
            MembershipError::InvalidRequest(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message)
            }
            MembershipError::MemberNotFound | MembershipError::WaitlistNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
            }
            MembershipError::EmailTaken
            | MembershipError::EmailOnWaitlist
            | MembershipError::EmailBelongsToMember => {
                ApiError::new(StatusCode::CONFLICT, "email_conflict", message)
            }
            MembershipError::MemberCapacityReached => {
                ApiError::new(StatusCode::CONFLICT, "max_members_reached", message)
            }
            MembershipError::WaitlistCapacityReached => {
                ApiError::new(StatusCode::CONFLICT, "max_waitlist_reached", message)
            }
            MembershipError::InvalidTransition => {
                ApiError::new(StatusCode::CONFLICT, "invalid_transition", message)
            }
        }
    }
}
