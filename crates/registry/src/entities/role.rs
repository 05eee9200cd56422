//! Roles, admin sub-roles, and the permission tables derived from them.
//!
//! Permission sets are resolved from these tables at session creation and at
//! admin-account creation. An `AdminUser` keeps the snapshot taken when it was
//! created; editing a table later does not retroactively change existing
//! records.

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
    Waitlist,
    Guest,
}

/// Admin sub-role for granular control over club administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    MembershipAdmin,
    ContentAdmin,
    SupportAdmin,
}

impl AdminRole {
    /// Parse the wire representation of a sub-role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "super_admin" => Some(AdminRole::SuperAdmin),
            "membership_admin" => Some(AdminRole::MembershipAdmin),
            "content_admin" => Some(AdminRole::ContentAdmin),
            "support_admin" => Some(AdminRole::SupportAdmin),
            _ => None,
        }
    }
}

/// Individual permission gating one class of operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewMembers,
    CreateMember,
    UpdateMember,
    DeleteMember,
    ViewWaitlist,
    UpdateWaitlist,
    ApproveWaitlist,
    AssignAdmin,
    RevokeAdmin,
    SystemSettings,
    UpdateOwnProfile,
    ViewOwnProfile,
}

const ADMIN_BASE_PERMISSIONS: &[Permission] = &[
    Permission::ViewMembers,
    Permission::CreateMember,
    Permission::UpdateMember,
    Permission::DeleteMember,
    Permission::ViewWaitlist,
    Permission::UpdateWaitlist,
    Permission::ApproveWaitlist,
    Permission::ViewOwnProfile,
    Permission::UpdateOwnProfile,
];

const SELF_SERVICE_PERMISSIONS: &[Permission] =
    &[Permission::ViewOwnProfile, Permission::UpdateOwnProfile];

const READ_ONLY_ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewMembers,
    Permission::ViewWaitlist,
    Permission::ViewOwnProfile,
    Permission::UpdateOwnProfile,
];

/// Permissions granted by a plain role, without any admin sub-role.
pub fn role_permissions(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::Admin => ADMIN_BASE_PERMISSIONS,
        UserRole::Member | UserRole::Waitlist => SELF_SERVICE_PERMISSIONS,
        UserRole::Guest => &[],
    }
}

/// Permissions granted by an admin sub-role.
pub fn admin_role_permissions(admin_role: AdminRole) -> Vec<Permission> {
    match admin_role {
        AdminRole::SuperAdmin => {
            let mut permissions = ADMIN_BASE_PERMISSIONS.to_vec();
            permissions.extend([
                Permission::AssignAdmin,
                Permission::RevokeAdmin,
                Permission::SystemSettings,
            ]);
            permissions
        }
        AdminRole::MembershipAdmin => ADMIN_BASE_PERMISSIONS.to_vec(),
        AdminRole::ContentAdmin | AdminRole::SupportAdmin => READ_ONLY_ADMIN_PERMISSIONS.to_vec(),
    }
}

/// Resolve the full permission set for an account.
pub fn permissions_for(role: UserRole, admin_role: Option<AdminRole>) -> Vec<Permission> {
    if role == UserRole::Admin {
        if let Some(admin_role) = admin_role {
            return admin_role_permissions(admin_role);
        }
    }

    role_permissions(role).to_vec()
}
