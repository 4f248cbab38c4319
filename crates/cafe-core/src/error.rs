//! Error type for configuration and primitive validation.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// Errors raised while validating a run before it starts.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid range for {name}: [{low}, {high}]")]
    InvalidRange {
        name: &'static str,
        low:  f64,
        high: f64,
    },
}

/// Shorthand result type for `cafe-core`.
pub type CoreResult<T> = Result<T, CoreError>;
