//! Shared application state for the gateway.

use std::sync::Arc;

use rangeclub_auth::Authenticator;
use rangeclub_membership::{MemberService, WaitlistService};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    authenticator: Arc<Authenticator>,
    member_service: Arc<MemberService>,
    waitlist_service: Arc<WaitlistService>,
}

impl GatewayState {
    pub fn new(
        authenticator: Arc<Authenticator>,
        member_service: Arc<MemberService>,
        waitlist_service: Arc<WaitlistService>,
    ) -> Self {
        Self {
            authenticator,
            member_service,
            waitlist_service,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn member_service(&self) -> &MemberService {
        &self.member_service
    }

    pub fn waitlist_service(&self) -> &WaitlistService {
        &self.waitlist_service
    }
}
