//! Core error type.
//!
//! `nap-schedule` wraps `CoreError` as one variant of its own error enum, so
//! a malformed time string surfaces unchanged from any entry point.

use thiserror::Error;

/// The error type for `nap-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid time of day {0:?}: expected HH:MM")]
    InvalidTime(String),
}

/// Shorthand result type for `nap-core`.
pub type CoreResult<T> = Result<T, CoreError>;
