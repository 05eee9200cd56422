//! Member and waitlist management for the rangeclub backend.
//!
//! Two services cover the membership lifecycle: [`MemberService`] for the
//! active-member registry and [`WaitlistService`] for applications, including
//! the approval flow that promotes an applicant to a member. Authorization is
//! enforced here against the caller's session, so every HTTP route stays a
//! thin wrapper.

pub mod error;
pub mod member_service;
pub mod types;
pub mod waitlist_service;

pub use error::{MembershipError, MembershipResult};
pub use member_service::MemberService;
pub use types::{
    CreateMemberRequest, MemberPage, PageParams, UpdateWaitlistRequest, WaitlistApplicationRequest,
    WaitlistPage,
};
pub use waitlist_service::{WaitlistService, WaitlistUpdateOutcome};
