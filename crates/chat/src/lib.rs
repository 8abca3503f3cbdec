//! Transport-facing surface of the bot.
//!
//! Concrete chat transports (see `moneta-irc`) implement [`ChatTransport`]
//! for sending and emit [`ChatEvent`]s for inbound traffic. The prefix
//! gating rules that decide which identity answers a message live in
//! [`gating`] so they stay pure and testable.

pub mod error;
pub mod event;
pub mod gating;
pub mod transport;

pub use {
    error::{Error, Result},
    event::ChatEvent,
    transport::ChatTransport,
};
