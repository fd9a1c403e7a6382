//! Spatial-subsystem error type.

use thiserror::Error;

use al_core::{AlError, NodeRef};

/// Errors produced by `al-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} is not part of the layout")]
    NodeNotFound(NodeRef),

    #[error("node {0} has a non-finite position")]
    NonFinite(NodeRef),

    #[error("degenerate layout: distance normalizer is {0}")]
    Degenerate(f64),

    #[error(transparent)]
    Core(#[from] AlError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
