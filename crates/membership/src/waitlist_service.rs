//! Service for waitlist applications and the approval flow.

use chrono::Utc;
use tracing::info;

use rangeclub_config::MembershipConfig;
use rangeclub_registry::{
    Member, MemberRepository, NewApplicant, NewMember, Permission, RegistryError, Session,
    UserRole, WaitlistMember, WaitlistRepository, WaitlistStatus,
};

use crate::error::{MembershipError, MembershipResult};
use crate::types::{PageParams, UpdateWaitlistRequest, WaitlistApplicationRequest, WaitlistPage};

/// Result of a waitlist update: either the entry itself changed, or the
/// entry was approved and a new active member was created from it.
#[derive(Debug, Clone)]
pub enum WaitlistUpdateOutcome {
    Updated(WaitlistMember),
    Approved(Member),
}

pub struct WaitlistService {
    waitlist: WaitlistRepository,
    members: MemberRepository,
    default_page_size: usize,
}

impl WaitlistService {
    pub fn new(
        waitlist: WaitlistRepository,
        members: MemberRepository,
        config: &MembershipConfig,
    ) -> Self {
        Self {
            waitlist,
            members,
            default_page_size: config.default_page_size,
        }
    }

    /// List applications. Pending entries sort by queue position, everything
    /// else by application date.
    pub async fn list(
        &self,
        caller: Option<&Session>,
        params: &PageParams,
    ) -> MembershipResult<WaitlistPage> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        if !session.has_permission(Permission::ViewWaitlist) {
            return Err(MembershipError::Forbidden);
        }

        let status = parse_status_filter(params.status.as_deref())?;
        let (limit, offset) = params.resolve(self.default_page_size);
        let (waitlist_members, total) = self.waitlist.list(status, limit, offset).await;

        Ok(WaitlistPage {
            waitlist_members,
            total,
            limit,
            offset,
        })
    }

    /// File a new application. Open to unauthenticated callers.
    pub async fn apply(
        &self,
        request: WaitlistApplicationRequest,
    ) -> MembershipResult<WaitlistMember> {
        let (Some(email), Some(first_name), Some(last_name)) =
            (request.email, request.first_name, request.last_name)
        else {
            return Err(MembershipError::MissingFields);
        };
        if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return Err(MembershipError::MissingFields);
        }

        if self.waitlist.email_exists(&email).await {
            return Err(MembershipError::EmailOnWaitlist);
        }
        if self.members.email_exists(&email).await {
            return Err(MembershipError::EmailBelongsToMember);
        }

        let applicant = NewApplicant {
            email,
            first_name,
            last_name,
            phone: request.phone,
            reason_for_joining: request.reason_for_joining,
            referred_by: request.referred_by,
        };

        let entry = self
            .waitlist
            .insert(applicant)
            .await
            .map_err(|err| match err {
                RegistryError::DuplicateEmail => MembershipError::EmailOnWaitlist,
                RegistryError::CapacityReached => MembershipError::WaitlistCapacityReached,
                RegistryError::NotFound => MembershipError::WaitlistNotFound,
            })?;

        info!(entry_id = %entry.id, position = entry.position, "new waitlist application");
        Ok(entry)
    }

    /// Update an application or change its status.
    ///
    /// Profile fields follow the same split as members: `update_waitlist`
    /// unlocks everything, the entrant may touch name, phone, and reason.
    /// Status changes run through the state machine; approval promotes the
    /// applicant into the member registry.
    pub async fn update(
        &self,
        caller: Option<&Session>,
        id: &str,
        request: UpdateWaitlistRequest,
    ) -> MembershipResult<WaitlistUpdateOutcome> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        let authorized = session.has_permission(Permission::UpdateWaitlist);
        let self_update = session.user.role == UserRole::Waitlist && session.user.id == id;

        if !authorized && !self_update {
            return Err(MembershipError::Forbidden);
        }

        let entry = self
            .waitlist
            .find_by_id(id)
            .await
            .ok_or(MembershipError::WaitlistNotFound)?;

        // A self-service payload may carry a status field; it is ignored.
        let target_status = if authorized {
            parse_status_field(request.status.as_deref())?
        } else {
            None
        };

        if let Some(target) = target_status {
            if target != entry.status {
                if entry.status.is_terminal() {
                    return Err(MembershipError::InvalidTransition);
                }

                if target == WaitlistStatus::Approved {
                    let member = self.approve(session, &entry).await?;
                    return Ok(WaitlistUpdateOutcome::Approved(member));
                }

                // PENDING -> REJECTED: apply any profile fields, then flip the
                // status so positions recompute over the shrunken pending set.
                self.waitlist
                    .update(id, &request.fields())
                    .await
                    .map_err(|_| MembershipError::WaitlistNotFound)?;
                let entry = self
                    .waitlist
                    .set_status(id, target)
                    .await
                    .map_err(|_| MembershipError::WaitlistNotFound)?;

                info!(entry_id = %id, status = ?target, "waitlist status changed");
                return Ok(WaitlistUpdateOutcome::Updated(entry));
            }
        }

        let fields = if authorized {
            request.fields()
        } else {
            request.fields().self_service()
        };
        let entry = self
            .waitlist
            .update(id, &fields)
            .await
            .map_err(|_| MembershipError::WaitlistNotFound)?;
        Ok(WaitlistUpdateOutcome::Updated(entry))
    }

    /// Remove an application outright and close the position gap.
    pub async fn delete(&self, caller: Option<&Session>, id: &str) -> MembershipResult<()> {
        let session = caller.ok_or(MembershipError::Unauthorized)?;
        if !session.has_permission(Permission::UpdateWaitlist) {
            return Err(MembershipError::Forbidden);
        }

        self.waitlist
            .delete(id)
            .await
            .map_err(|_| MembershipError::WaitlistNotFound)?;

        info!(entry_id = %id, "deleted waitlist entry");
        Ok(())
    }

    /// Promote a pending applicant to an active member. The member is created
    /// first so a capacity rejection leaves the application pending.
    async fn approve(
        &self,
        session: &Session,
        entry: &WaitlistMember,
    ) -> MembershipResult<Member> {
        if !session.has_permission(Permission::ApproveWaitlist) {
            return Err(MembershipError::Forbidden);
        }

        let input = NewMember {
            email: entry.email.clone(),
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            phone: entry.phone.clone(),
            profile_picture: None,
            bio: None,
            address: None,
            preferences: None,
        };

        let member = self
            .members
            .insert(Member::new(input, Utc::now()))
            .await
            .map_err(|err| match err {
                RegistryError::CapacityReached => MembershipError::MemberCapacityReached,
                _ => MembershipError::EmailBelongsToMember,
            })?;

        self.waitlist
            .set_status(&entry.id, WaitlistStatus::Approved)
            .await
            .map_err(|_| MembershipError::WaitlistNotFound)?;

        info!(
            entry_id = %entry.id,
            member_id = %member.id,
            "approved waitlist entry into membership"
        );
        Ok(member)
    }
}

fn parse_status_filter(raw: Option<&str>) -> MembershipResult<Option<WaitlistStatus>> {
    match raw {
        None => Ok(None),
        Some(value) => WaitlistStatus::parse(value)
            .map(Some)
            .ok_or_else(|| MembershipError::InvalidRequest(format!("unknown status '{value}'"))),
    }
}

fn parse_status_field(raw: Option<&str>) -> MembershipResult<Option<WaitlistStatus>> {
    match raw {
        None => Ok(None),
        Some(value) => WaitlistStatus::parse(value).map(Some).ok_or_else(|| {
            MembershipError::InvalidRequest(format!("unknown waitlist status '{value}'"))
        }),
    }
}
