//! Per-identity response templates and placeholder substitution.
//!
//! Each identity carries a [`TemplateSet`]: named categories ("lurk",
//! "denied", "swap", …) each holding interchangeable candidate strings.
//! Picking is random; candidates containing `{placeholder}` tokens are
//! rendered against a [`LiveContext`] plus caller-supplied extras by
//! [`render`].

pub mod error;
pub mod render;
pub mod set;

pub use {
    error::{Error, Result},
    render::{FALLBACK_MARKER, LiveContext, render},
    set::TemplateSet,
};
