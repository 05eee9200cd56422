//! Service for managing active club members.

use chrono::Utc;
use tracing::info;

use rangeclub_config::MembershipConfig;
use rangeclub_registry::{
    Member, MemberRepository, MemberStatus, MemberUpdate, NewMember, Permission, RegistryError,
    Session, UserRole,
};

use crate::error::{MembershipError, MembershipResult};
use crate::types::{CreateMemberRequest, MemberPage, PageParams};

pub struct MemberService {
    members: MemberRepository,
    default_page_size: usize,
}

impl MemberService {
    pub fn new(members: MemberRepository, config: &MembershipConfig) -> Self {
        Self {
            members,
            default_page_size: config.default_page_size,
        }
    }

    /// List members with pagination and an optional status filter.
    pub async fn list(
        &self,
        caller: Option<&Session>,
        params: &PageParams,
    ) -> MembershipResult<MemberPage> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        if !session.has_permission(Permission::ViewMembers) {
            return Err(MembershipError::Forbidden);
        }

        let status = parse_status_filter(params.status.as_deref())?;
        let (limit, offset) = params.resolve(self.default_page_size);
        let (members, total) = self.members.list(status, limit, offset).await;

        Ok(MemberPage {
            members,
            total,
            limit,
            offset,
        })
    }

    /// Create an active member directly, bypassing the waitlist.
    pub async fn create(
        &self,
        caller: Option<&Session>,
        request: CreateMemberRequest,
    ) -> MembershipResult<Member> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        if !session.has_permission(Permission::CreateMember) {
            return Err(MembershipError::Forbidden);
        }

        if self.members.active_count().await >= self.members.capacity() {
            return Err(MembershipError::MemberCapacityReached);
        }

        let (Some(email), Some(first_name), Some(last_name)) =
            (request.email, request.first_name, request.last_name)
        else {
            return Err(MembershipError::MissingFields);
        };
        if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return Err(MembershipError::MissingFields);
        }

        let input = NewMember {
            email,
            first_name,
            last_name,
            phone: request.phone,
            profile_picture: request.profile_picture,
            bio: request.bio,
            address: request.address,
            preferences: request.preferences,
        };

        let member = self
            .members
            .insert(Member::new(input, Utc::now()))
            .await
            .map_err(|err| match err {
                RegistryError::DuplicateEmail => MembershipError::EmailTaken,
                RegistryError::CapacityReached => MembershipError::MemberCapacityReached,
                RegistryError::NotFound => MembershipError::MemberNotFound,
            })?;

        info!(member_id = %member.id, membership_id = %member.membership_id, "created member");
        Ok(member)
    }

    /// Update a member. Admins holding `update_member` may change any field;
    /// a member may update their own profile minus the email address.
    pub async fn update(
        &self,
        caller: Option<&Session>,
        id: &str,
        update: MemberUpdate,
    ) -> MembershipResult<Member> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        let authorized = session.has_permission(Permission::UpdateMember);
        let self_update = session.user.role == UserRole::Member && session.user.id == id;

        if !authorized && !self_update {
            return Err(MembershipError::Forbidden);
        }

        let update = if authorized {
            update
        } else {
            update.self_service()
        };

        self.members
            .update(id, &update)
            .await
            .map_err(|_| MembershipError::MemberNotFound)
    }

    /// Remove a member record outright. Not self-serviceable.
    pub async fn delete(&self, caller: Option<&Session>, id: &str) -> MembershipResult<()> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        if !session.has_permission(Permission::DeleteMember) {
            return Err(MembershipError::Forbidden);
        }

        self.members
            .delete(id)
            .await
            .map_err(|_| MembershipError::MemberNotFound)?;

        info!(member_id = %id, "deleted member");
        Ok(())
    }
}

fn parse_status_filter(raw: Option<&str>) -> MembershipResult<Option<MemberStatus>> {
    match raw {
        None => Ok(None),
        Some(value) => MemberStatus::parse(value)
            .map(Some)
            .ok_or_else(|| MembershipError::InvalidRequest(format!("unknown status '{value}'"))),
    }
}
