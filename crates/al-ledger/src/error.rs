//! Ledger error type.

use thiserror::Error;

use al_core::{AlError, SpokeId};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("spoke {0} not found in ledger")]
    SpokeNotFound(SpokeId),

    #[error(transparent)]
    Core(#[from] AlError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
