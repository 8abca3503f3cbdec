//! Built-in command implementations.

pub(crate) mod coinflip;
pub(crate) mod custom;
pub(crate) mod misc;
pub(crate) mod pog;
pub(crate) mod swap;
