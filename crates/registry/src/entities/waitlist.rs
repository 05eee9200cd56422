use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a waitlist application. `Pending` is the only non-terminal
/// state; approved and rejected entries stay in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Approved,
    Rejected,
}

impl WaitlistStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(WaitlistStatus::Pending),
            "approved" => Some(WaitlistStatus::Approved),
            "rejected" => Some(WaitlistStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, WaitlistStatus::Pending)
    }
}

/// A waitlist applicant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistMember {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: WaitlistStatus,
    pub application_date: DateTime<Utc>,
    /// 1-based queue position, meaningful only while the entry is pending.
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_joining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new waitlist application
#[derive(Debug, Clone)]
pub struct NewApplicant {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub reason_for_joining: Option<String>,
    pub referred_by: Option<String>,
}

impl WaitlistMember {
    pub fn new(input: NewApplicant, position: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            status: WaitlistStatus::Pending,
            application_date: now,
            position,
            reason_for_joining: input.reason_for_joining,
            referred_by: input.referred_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place. Status transitions are handled by the
    /// repository so that positions are recomputed alongside.
    pub fn apply(&mut self, update: &WaitlistUpdate, now: DateTime<Utc>) {
        if let Some(ref email) = update.email {
            self.email = email.clone();
        }
        if let Some(ref first_name) = update.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(ref last_name) = update.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(ref phone) = update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(ref reason) = update.reason_for_joining {
            self.reason_for_joining = Some(reason.clone());
        }
        if let Some(ref referred_by) = update.referred_by {
            self.referred_by = Some(referred_by.clone());
        }
        self.updated_at = now;
    }
}

/// Partial waitlist update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitlistUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub reason_for_joining: Option<String>,
    pub referred_by: Option<String>,
}

impl WaitlistUpdate {
    /// Restrict the update to the fields an applicant may change on their own
    /// entry: name, phone, and the reason for joining.
    pub fn self_service(self) -> Self {
        Self {
            email: None,
            referred_by: None,
            ..self
        }
    }
}
