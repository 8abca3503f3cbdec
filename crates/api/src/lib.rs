//! Platform REST collaborators.
//!
//! [`PlatformApi`] is the narrow capability surface the bot core consumes:
//! current-stream lookup, login → user-id resolution, and blocked-term
//! moderation. [`HelixClient`] is the production implementation, including
//! the refresh-token dance and the per-identity token cache file.
//! [`QuoteSource`] covers the one non-platform REST call (the quote API the
//! kanye command reads from).

pub mod error;
pub mod helix;
pub mod platform;
pub mod quotes;
pub mod token;
pub mod types;

pub use {
    error::{Error, Result},
    helix::HelixClient,
    platform::PlatformApi,
    quotes::{KanyeRest, QuoteSource},
    token::TokenPair,
    types::{BlockedTerm, StreamInfo},
};
