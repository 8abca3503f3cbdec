//! Shared types used across all moneta crates.

pub mod types;

pub use types::{CallerRoles, channel_login};
