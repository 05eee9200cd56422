pub mod admin;
pub mod credential;
pub mod member;
pub mod role;
pub mod session;
pub mod waitlist;
