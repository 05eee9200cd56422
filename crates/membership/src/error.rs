//! Error types for the membership services.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Member not found")]
    MemberNotFound,

    #[error("Waitlist member not found")]
    WaitlistNotFound,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Email already in waitlist")]
    EmailOnWaitlist,

    #[error("Email already belongs to an active member")]
    EmailBelongsToMember,

    #[error("Maximum number of active members reached")]
    MemberCapacityReached,

    #[error("Maximum waitlist capacity reached")]
    WaitlistCapacityReached,

    #[error("Only pending applications can change status")]
    InvalidTransition,
}

pub type MembershipResult<T> = Result<T, MembershipError>;
