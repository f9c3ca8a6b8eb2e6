//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `HwError` where they need
//! to surface configuration problems.

use thiserror::Error;

/// The top-level error type for `hw-core`.
#[derive(Debug, Error)]
pub enum HwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `hw-core`.
pub type HwResult<T> = Result<T, HwError>;
