//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `BnError` as one variant
//! via `#[from]`, keeping error sites clean at crate seams.

use thiserror::Error;

/// The top-level error type for `bn-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum BnError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `bn-*` crates.
pub type BnResult<T> = Result<T, BnError>;
