//! # Rangeclub Registry Crate
//!
//! Entities and process-memory registries for the rangeclub backend. Every
//! registry lives for the lifetime of the process and is guarded by an async
//! `RwLock`; capacity checks and inserts share one critical section so two
//! concurrent requests can never push a registry past its cap.

pub mod entities;
pub mod repos;
pub mod types;

pub use entities::admin::AdminUser;
pub use entities::credential::Credential;
pub use entities::member::{
    generate_membership_id, Address, Member, MemberPreferences, MemberStatus, MemberUpdate,
    NewMember, PreferencesUpdate,
};
pub use entities::role::{admin_role_permissions, permissions_for, AdminRole, Permission, UserRole};
pub use entities::session::{Session, SessionUser};
pub use entities::waitlist::{NewApplicant, WaitlistMember, WaitlistStatus, WaitlistUpdate};
pub use repos::{
    AdminRepository, CredentialRepository, MemberRepository, SessionRepository, WaitlistRepository,
};
pub use types::{RegistryError, RegistryResult};
