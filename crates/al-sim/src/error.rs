use al_core::AlError;
use al_dispatch::DispatchError;
use al_fleet::FleetError;
use al_ledger::LedgerError;
use al_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match spoke count {expected}")]
    SpokeCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("unknown scenario {0:?}")]
    UnknownScenario(String),

    #[error(transparent)]
    Core(#[from] AlError),

    #[error("layout error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
