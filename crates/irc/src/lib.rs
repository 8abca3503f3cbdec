//! IRC-over-WebSocket chat transport.
//!
//! Wire details stay in this crate: the rest of the system sends through
//! [`moneta_chat::ChatTransport`] and receives [`moneta_chat::ChatEvent`]s
//! from the mpsc receiver handed out by [`IrcClient::spawn`].

pub mod error;
pub mod parse;
pub mod transport;

pub use {
    error::{Error, Result},
    transport::{IrcClient, IrcConfig},
};
