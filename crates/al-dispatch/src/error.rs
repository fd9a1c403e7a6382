use al_core::AlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("pair {index} ({first}, {second}) references a spoke outside 0..{spoke_count}")]
    PairOutOfRange { index: usize, first: u32, second: u32, spoke_count: usize },

    #[error(transparent)]
    Core(#[from] AlError),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
