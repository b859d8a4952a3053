//! # Shiftwatch Session
//! Authenticated member-site session: login handshake, liveness probe,
//! cookie persistence between polls.

pub mod session;
pub mod store;

pub use session::MemberSession;
pub use store::{SavedSession, SessionStore};
