use serde::{Deserialize, Serialize};

use super::role::{AdminRole, UserRole};

/// Login credential, linked 1:1 to a member, waitlist applicant, or admin by
/// id. The password hash is an argon2 PHC string with the salt embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<AdminRole>,
}
