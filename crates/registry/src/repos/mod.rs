mod admin_repository;
mod credential_repository;
mod member_repository;
mod session_repository;
mod waitlist_repository;

pub use admin_repository::AdminRepository;
pub use credential_repository::CredentialRepository;
pub use member_repository::MemberRepository;
pub use session_repository::SessionRepository;
pub use waitlist_repository::WaitlistRepository;
