//! Authentication and account lifecycle for the rangeclub backend.
//!
//! The [`Authenticator`] owns every credential and session flow: self-service
//! registration with member/waitlist routing, login, privileged admin
//! registration, token refresh, and logout. Registries are injected so the
//! HTTP layer and the membership services share the same process-wide state.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use rand::RngCore;
use tracing::{debug, info};
use uuid::Uuid;

use rangeclub_config::AuthConfig;
use rangeclub_registry::{
    permissions_for, AdminRepository, AdminRole, AdminUser, Credential, CredentialRepository,
    Member, MemberRepository, NewApplicant, NewMember, Permission, RegistryError, Session,
    SessionRepository, SessionUser, UserRole, WaitlistRepository,
};

pub mod password;
pub mod types;
pub mod validation;

pub use types::{
    AdminCreated, AdminRegistrationRequest, AuthError, AuthResult, AuthSuccess, AuthUser,
    LoginRequest, LogoutOutcome, RegistrationRequest,
};

#[derive(Clone)]
pub struct Authenticator {
    credentials: CredentialRepository,
    sessions: SessionRepository,
    members: MemberRepository,
    waitlist: WaitlistRepository,
    admins: AdminRepository,
    session_ttl: Duration,
}

impl Authenticator {
    pub fn new(
        credentials: CredentialRepository,
        sessions: SessionRepository,
        members: MemberRepository,
        waitlist: WaitlistRepository,
        admins: AdminRepository,
        config: &AuthConfig,
    ) -> Self {
        let session_ttl = Duration::seconds(config.session_ttl_seconds.min(i64::MAX as u64) as i64);

        Self {
            credentials,
            sessions,
            members,
            waitlist,
            admins,
            session_ttl,
        }
    }

    /// Register a new account. While the member registry has headroom the
    /// account becomes an active member; otherwise it lands on the waitlist;
    /// once both are full registration is closed. A credential and a session
    /// are created either way.
    pub async fn register(&self, request: RegistrationRequest) -> AuthResult<AuthSuccess> {
        let email = required(request.email)?;
        let password = required(request.password)?;
        let confirm_password = required(request.confirm_password)?;
        let first_name = required(request.first_name)?;
        let last_name = required(request.last_name)?;

        if !validation::is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        password::validate_password(&password).map_err(AuthError::PasswordPolicy)?;
        if self.credentials.email_exists(&email).await {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let member_input = NewMember {
            email: email.clone(),
            first_name: first_name.clone(),
            last_name: last_name.clone(),
            phone: request.phone.clone(),
            profile_picture: None,
            bio: None,
            address: None,
            preferences: None,
        };

        let (user_id, role) = match self.members.insert(Member::new(member_input, now)).await {
            Ok(member) => {
                debug!(member_id = %member.id, "registration admitted as active member");
                (member.id, UserRole::Member)
            }
            Err(RegistryError::CapacityReached) => {
                let applicant = NewApplicant {
                    email: email.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    phone: request.phone,
                    reason_for_joining: request.reason_for_joining,
                    referred_by: request.referred_by,
                };
                match self.waitlist.insert(applicant).await {
                    Ok(entry) => {
                        debug!(entry_id = %entry.id, position = entry.position, "registration routed to waitlist");
                        (entry.id, UserRole::Waitlist)
                    }
                    Err(RegistryError::CapacityReached) => {
                        return Err(AuthError::RegistrationClosed)
                    }
                    Err(_) => return Err(AuthError::EmailTaken),
                }
            }
            Err(_) => return Err(AuthError::EmailTaken),
        };

        let password_hash = password::hash_password(&password)?;
        self.credentials
            .insert(Credential {
                id: user_id.clone(),
                email: email.clone(),
                password_hash,
                role,
                admin_role: None,
            })
            .await
            .map_err(|_| AuthError::EmailTaken)?;

        let session = self.issue_session(user_id.clone(), email.clone(), role, None).await;

        Ok(AuthSuccess {
            user: AuthUser {
                id: user_id,
                email,
                first_name,
                last_name,
                role,
                admin_role: None,
            },
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Log an account in. Unknown email and wrong password fail identically
    /// so the response never reveals which part was wrong.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<AuthSuccess> {
        let email = required(request.email)?;
        let password = required(request.password)?;

        let Some(credential) = self.credentials.find_by_email(&email).await else {
            return Err(AuthError::InvalidCredentials);
        };
        if !password::verify_password(&password, &credential.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let (first_name, last_name) = self.display_name(&credential.id, credential.role).await;

        if credential.role == UserRole::Member {
            self.members.touch_last_login(&credential.id).await;
        }

        let session = self
            .issue_session(
                credential.id.clone(),
                credential.email.clone(),
                credential.role,
                credential.admin_role,
            )
            .await;

        Ok(AuthSuccess {
            user: AuthUser {
                id: credential.id,
                email: credential.email,
                first_name,
                last_name,
                role: credential.role,
                admin_role: credential.admin_role,
            },
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Create a new administrator. Requires a live admin session holding the
    /// assign-admin permission; creating a super admin additionally requires
    /// the caller to be a super admin. No session is created for the new
    /// account.
    pub async fn register_admin(
        &self,
        token: Option<&str>,
        request: AdminRegistrationRequest,
    ) -> AuthResult<AdminCreated> {
        let token = token.ok_or(AuthError::SessionNotFound)?;
        let session = self.authenticate(token).await?;

        if session.user.role != UserRole::Admin
            || !session.has_permission(Permission::AssignAdmin)
        {
            return Err(AuthError::Forbidden);
        }

        let email = required(request.email)?;
        let password = required(request.password)?;
        let confirm_password = required(request.confirm_password)?;
        let first_name = required(request.first_name)?;
        let last_name = required(request.last_name)?;
        let admin_role_raw = required(request.admin_role)?;

        if !validation::is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        password::validate_password(&password).map_err(AuthError::PasswordPolicy)?;
        if self.credentials.email_exists(&email).await {
            return Err(AuthError::EmailTaken);
        }

        let admin_role =
            AdminRole::parse(&admin_role_raw).ok_or(AuthError::UnknownAdminRole)?;
        if admin_role == AdminRole::SuperAdmin
            && session.user.admin_role != Some(AdminRole::SuperAdmin)
        {
            return Err(AuthError::SuperAdminRequired);
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let password_hash = password::hash_password(&password)?;

        self.credentials
            .insert(Credential {
                id: id.clone(),
                email: email.clone(),
                password_hash,
                role: UserRole::Admin,
                admin_role: Some(admin_role),
            })
            .await
            .map_err(|_| AuthError::EmailTaken)?;

        let admin = self
            .admins
            .insert(AdminUser::new(
                id,
                email,
                first_name,
                last_name,
                admin_role,
                now,
            ))
            .await;

        info!(admin_id = %admin.id, admin_role = ?admin.admin_role, "created admin account");

        Ok(AdminCreated {
            id: admin.id,
            email: admin.email,
            first_name: admin.first_name,
            last_name: admin.last_name,
            role: UserRole::Admin,
            admin_role,
            created: true,
        })
    }

    /// Exchange a live token for a fresh one carrying the same identity. The
    /// old session is invalidated and the new one expires a full TTL from now.
    pub async fn refresh(&self, token: Option<&str>) -> AuthResult<AuthSuccess> {
        let token = token.ok_or(AuthError::SessionNotFound)?;
        let session = self.authenticate(token).await?;

        self.sessions.remove(token).await;

        let user = session.user;
        let new_session = self
            .issue_session(user.id.clone(), user.email.clone(), user.role, user.admin_role)
            .await;

        let (first_name, last_name) = self.display_name(&user.id, user.role).await;

        Ok(AuthSuccess {
            user: AuthUser {
                id: user.id,
                email: user.email,
                first_name,
                last_name,
                role: user.role,
                admin_role: user.admin_role,
            },
            token: new_session.token,
            expires_at: new_session.expires_at,
        })
    }

    /// Remove the session for a token. Safe to call repeatedly with the same
    /// token; only the first call reports a terminated session.
    pub async fn logout(&self, token: &str) -> LogoutOutcome {
        let session_terminated = self.sessions.remove(token).await;
        LogoutOutcome {
            logged_out: true,
            session_terminated,
        }
    }

    /// Resolve a bearer token to its live session. Expired sessions are
    /// purged from the store before the error is returned.
    pub async fn authenticate(&self, token: &str) -> AuthResult<Session> {
        let Some(session) = self.sessions.find(token).await else {
            return Err(AuthError::SessionNotFound);
        };

        if session.is_expired(Utc::now()) {
            self.sessions.remove(token).await;
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }

    /// Provision the initial super admin from configuration. A no-op when the
    /// email is already registered, so restarts stay idempotent.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> AuthResult<()> {
        if self.credentials.email_exists(email).await {
            return Ok(());
        }

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let password_hash = password::hash_password(password)?;

        self.credentials
            .insert(Credential {
                id: id.clone(),
                email: email.to_owned(),
                password_hash,
                role: UserRole::Admin,
                admin_role: Some(AdminRole::SuperAdmin),
            })
            .await
            .map_err(|_| AuthError::EmailTaken)?;

        self.admins
            .insert(AdminUser::new(
                id,
                email.to_owned(),
                "Super".to_owned(),
                "Admin".to_owned(),
                AdminRole::SuperAdmin,
                now,
            ))
            .await;

        info!(email, "provisioned bootstrap super admin");
        Ok(())
    }

    async fn display_name(&self, id: &str, role: UserRole) -> (String, String) {
        match role {
            UserRole::Admin => match self.admins.find_by_id(id).await {
                Some(admin) => (admin.first_name, admin.last_name),
                None => (String::new(), String::new()),
            },
            UserRole::Member => match self.members.find_by_id(id).await {
                Some(member) => (member.first_name, member.last_name),
                None => (String::new(), String::new()),
            },
            UserRole::Waitlist => match self.waitlist.find_by_id(id).await {
                Some(entry) => (entry.first_name, entry.last_name),
                None => (String::new(), String::new()),
            },
            UserRole::Guest => (String::new(), String::new()),
        }
    }

    async fn issue_session(
        &self,
        id: String,
        email: String,
        role: UserRole,
        admin_role: Option<AdminRole>,
    ) -> Session {
        let user = SessionUser {
            id,
            email,
            role,
            admin_role,
            permissions: permissions_for(role, admin_role),
        };
        let session = Session::new(user, generate_session_token(), Utc::now(), self.session_ttl);
        self.sessions.insert(session.clone()).await;
        session
    }
}

fn required(value: Option<String>) -> AuthResult<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::MissingFields),
    }
}

fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
