//! Request, response, and paging types for the membership services.

use serde::{Deserialize, Serialize};

use rangeclub_registry::{
    Address, Member, MemberPreferences, WaitlistMember, WaitlistUpdate,
};

/// Admin-created member payload. Required fields are validated by the
/// service so a missing value surfaces as `invalid_request`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateMemberRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub address: Option<Address>,
    pub preferences: Option<MemberPreferences>,
}

/// Public waitlist application payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitlistApplicationRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub reason_for_joining: Option<String>,
    pub referred_by: Option<String>,
}

/// Waitlist update payload. `status` rides alongside the profile fields and
/// is interpreted by the service against the application state machine.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateWaitlistRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub reason_for_joining: Option<String>,
    pub referred_by: Option<String>,
    pub status: Option<String>,
}

impl UpdateWaitlistRequest {
    /// The profile-field part of the update, without the status change.
    pub fn fields(&self) -> WaitlistUpdate {
        WaitlistUpdate {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            reason_for_joining: self.reason_for_joining.clone(),
            referred_by: self.referred_by.clone(),
        }
    }
}

/// Pagination and filter query parameters. `page` is an alternative to
/// `offset`; when both are present the explicit offset wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub page: Option<usize>,
    pub status: Option<String>,
}

impl PageParams {
    pub fn resolve(&self, default_limit: usize) -> (usize, usize) {
        let limit = self.limit.unwrap_or(default_limit);
        let offset = self
            .offset
            .or_else(|| self.page.map(|page| page.saturating_sub(1) * limit))
            .unwrap_or(0);
        (limit, offset)
    }
}

/// One page of the member registry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPage {
    pub members: Vec<Member>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// One page of the waitlist
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistPage {
    pub waitlist_members: Vec<WaitlistMember>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
