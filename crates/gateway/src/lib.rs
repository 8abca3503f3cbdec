//! Runtime wiring: builds sessions from config, runs one event loop per
//! identity, and routes inbound chat events into the dispatcher.

pub mod listener;
pub mod runtime;

pub use {listener::Listener, runtime::run};
