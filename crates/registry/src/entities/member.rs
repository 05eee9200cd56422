use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an active club member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Suspended,
}

impl MemberStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(MemberStatus::Active),
            "inactive" => Some(MemberStatus::Inactive),
            "suspended" => Some(MemberStatus::Suspended),
            _ => None,
        }
    }
}

/// Postal address attached to a member profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Notification and visibility preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPreferences {
    pub receive_emails: bool,
    pub receive_notifications: bool,
    pub is_public_profile: bool,
}

impl Default for MemberPreferences {
    fn default() -> Self {
        Self {
            receive_emails: true,
            receive_notifications: true,
            is_public_profile: false,
        }
    }
}

/// An active club member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub member_since: DateTime<Utc>,
    /// Display identifier printed on membership cards, `MEM-` plus six digits.
    pub membership_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub preferences: MemberPreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an active member
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub address: Option<Address>,
    pub preferences: Option<MemberPreferences>,
}

impl Member {
    /// Create a new active member with a fresh id and membership id.
    pub fn new(input: NewMember, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            status: MemberStatus::Active,
            member_since: now,
            membership_id: generate_membership_id(),
            profile_picture: input.profile_picture,
            bio: input.bio,
            address: input.address,
            preferences: input.preferences.unwrap_or_default(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &MemberUpdate, now: DateTime<Utc>) {
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
        if let Some(ref profile_picture) = update.profile_picture {
            self.profile_picture = Some(profile_picture.clone());
        }
        if let Some(ref bio) = update.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(ref address) = update.address {
            self.address = Some(address.clone());
        }
        if let Some(ref preferences) = update.preferences {
            preferences.merge_into(&mut self.preferences);
        }
        self.updated_at = now;
    }
}

/// Partial member update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub address: Option<Address>,
    pub preferences: Option<PreferencesUpdate>,
}

impl MemberUpdate {
    /// Restrict the update to the fields a member may change on their own
    /// profile. Email stays under admin control.
    pub fn self_service(self) -> Self {
        Self { email: None, ..self }
    }
}

/// Field-wise preferences update, merged over the stored preferences
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
    pub receive_emails: Option<bool>,
    pub receive_notifications: Option<bool>,
    pub is_public_profile: Option<bool>,
}

impl PreferencesUpdate {
    pub fn merge_into(&self, preferences: &mut MemberPreferences) {
        if let Some(receive_emails) = self.receive_emails {
            preferences.receive_emails = receive_emails;
        }
        if let Some(receive_notifications) = self.receive_notifications {
            preferences.receive_notifications = receive_notifications;
        }
        if let Some(is_public_profile) = self.is_public_profile {
            preferences.is_public_profile = is_public_profile;
        }
    }
}

/// Generate a membership display id of the form `MEM-123456`.
pub fn generate_membership_id() -> String {
    let digits = rand::thread_rng().gen_range(100_000..1_000_000);
    format!("MEM-{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_member() -> Member {
        Member::new(
            NewMember {
                email: "shooter@example.com".into(),
                first_name: "Casey".into(),
                last_name: "Flint".into(),
                phone: None,
                profile_picture: None,
                bio: None,
                address: None,
                preferences: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn new_member_defaults_preferences_and_status() {
        let member = sample_member();
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.preferences, MemberPreferences::default());
        assert!(member.preferences.receive_emails);
        assert!(!member.preferences.is_public_profile);
        assert!(member.last_login.is_none());
    }

    #[test]
    fn membership_id_has_display_format() {
        let id = generate_membership_id();
        assert!(id.starts_with("MEM-"));
        assert_eq!(id.len(), 10);
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn self_service_update_drops_email() {
        let update = MemberUpdate {
            email: Some("new@example.com".into()),
            bio: Some("IPSC shooter".into()),
            ..MemberUpdate::default()
        };

        let restricted = update.self_service();
        assert!(restricted.email.is_none());
        assert_eq!(restricted.bio.as_deref(), Some("IPSC shooter"));
    }

    #[test]
    fn preferences_merge_is_field_wise() {
        let mut member = sample_member();
        let update = MemberUpdate {
            preferences: Some(PreferencesUpdate {
                receive_emails: Some(false),
                ..PreferencesUpdate::default()
            }),
            ..MemberUpdate::default()
        };

        member.apply(&update, Utc::now());
        assert!(!member.preferences.receive_emails);
        assert!(member.preferences.receive_notifications);
    }

    #[test]
    fn member_serializes_with_camel_case_keys() {
        let member = sample_member();
        let json = serde_json::to_value(&member).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("membershipId").is_some());
        assert!(json.get("memberSince").is_some());
        assert_eq!(json["status"], "active");
    }
}
