//! Bot identities and the switchboard that tracks which one is active.

pub mod session;
pub mod switchboard;

pub use {session::IdentitySession, switchboard::Switchboard};
