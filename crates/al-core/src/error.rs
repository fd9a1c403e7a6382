//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `AlError` as one variant
//! via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::{AircraftId, SpokeId};

/// The top-level error type for `al-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AlError {
    #[error("spoke {0} not found")]
    SpokeNotFound(SpokeId),

    #[error("aircraft {0} not found")]
    AircraftNotFound(AircraftId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `al-*` crates.
pub type AlResult<T> = Result<T, AlError>;
