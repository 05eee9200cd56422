//! Request and response types for the authentication flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rangeclub_registry::{AdminRole, UserRole};

/// Self-service registration payload. Presence of the required fields is
/// checked by the service so missing values surface as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub reason_for_joining: Option<String>,
    pub referred_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Privileged registration of a new administrator. The sub-role arrives as a
/// wire string so an unknown value yields `invalid_role` instead of a parse
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminRegistrationRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin_role: Option<String>,
}

/// User summary returned by the authentication endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<AdminRole>,
}

/// Successful registration/login/refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSuccess {
    pub user: AuthUser,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Response to a privileged admin registration; no session is created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreated {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub admin_role: AdminRole,
    pub created: bool,
}

/// Logout always succeeds; `session_terminated` reports whether a live
/// session was actually removed.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutOutcome {
    pub logged_out: bool,
    pub session_terminated: bool,
}

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password does not meet requirements")]
    PasswordPolicy(Vec<String>),

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Registration is currently closed. Both member list and waitlist are at capacity")]
    RegistrationClosed,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Requires admin with permission to assign admin roles")]
    Forbidden,

    #[error("Invalid admin role")]
    UnknownAdminRole,

    #[error("Only super admins can create other super admins")]
    SuperAdminRequired,

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

pub type AuthResult<T> = Result<T, AuthError>;
