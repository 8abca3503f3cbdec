//! Command dispatch, access control, and the built-in command handlers.
//!
//! An inbound message that survived prefix gating flows through
//! [`Dispatcher::dispatch`]: tokenize, look the word up in the
//! [`CommandRegistry`] (built-ins first, then per-channel custom commands),
//! check the caller's [`AccessTier`], run the handler. Handler failures are
//! logged at the dispatch boundary and never escape it.

pub mod access;
pub mod custom;
pub mod custom_file;
pub mod dispatch;
pub mod error;
mod handlers;
pub mod registry;
pub mod say;

pub use {
    access::{AccessTier, satisfies},
    custom::{CustomCommandMap, CustomCommandSink, CustomCommands, MemorySink},
    custom_file::FileSink,
    dispatch::{Dispatcher, Invocation},
    error::{Error, Result},
    registry::{CommandEntry, CommandKind, CommandRegistry},
    say::say_random,
};
