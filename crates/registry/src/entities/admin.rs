use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::{admin_role_permissions, AdminRole, Permission, UserRole};

/// An administrator account. The permission set is resolved from the sub-role
/// table once, at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub admin_role: AdminRole,
    pub permissions: Vec<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminUser {
    pub fn new(
        id: String,
        email: String,
        first_name: String,
        last_name: String,
        admin_role: AdminRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            first_name,
            last_name,
            role: UserRole::Admin,
            admin_role,
            permissions: admin_role_permissions(admin_role),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }
}
