use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use rangeclub_auth::Authenticator;
use rangeclub_config::AppConfig;
use rangeclub_membership::{MemberService, WaitlistService};
use rangeclub_registry::{
    AdminRepository, CredentialRepository, MemberRepository, SessionRepository, WaitlistRepository,
};

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// All wired services sharing one set of process-memory registries.
#[derive(Clone)]
pub struct BackendServices {
    pub authenticator: Arc<Authenticator>,
    pub member_service: Arc<MemberService>,
    pub waitlist_service: Arc<WaitlistService>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let members = MemberRepository::new(config.membership.active_members_max);
        let waitlist = WaitlistRepository::new(config.membership.waitlist_max);
        let credentials = CredentialRepository::new();
        let sessions = SessionRepository::new();
        let admins = AdminRepository::new();

        let authenticator = Arc::new(Authenticator::new(
            credentials,
            sessions,
            members.clone(),
            waitlist.clone(),
            admins,
            &config.auth,
        ));

        if let (Some(email), Some(password)) = (
            config.auth.bootstrap.admin_email.as_deref(),
            config.auth.bootstrap.admin_password.as_deref(),
        ) {
            authenticator
                .bootstrap_admin(email, password)
                .await
                .map_err(|error| {
                    anyhow::anyhow!("failed to provision bootstrap admin: {error}")
                })?;
        }

        let member_service = Arc::new(MemberService::new(members.clone(), &config.membership));
        let waitlist_service = Arc::new(WaitlistService::new(
            waitlist,
            members,
            &config.membership,
        ));

        info!(
            member_cap = config.membership.active_members_max,
            waitlist_cap = config.membership.waitlist_max,
            "membership registries ready"
        );

        Ok(Self {
            authenticator,
            member_service,
            waitlist_service,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
