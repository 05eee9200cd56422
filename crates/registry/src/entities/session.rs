use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::role::{AdminRole, Permission, UserRole};

/// Identity snapshot carried by a session. The permission set is cached at
/// session creation and not re-derived on later requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<AdminRole>,
    pub permissions: Vec<Permission>,
}

/// A live bearer-token session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: SessionUser, token: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user,
            token,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.user.permissions.contains(&permission)
    }
}
