use al_core::{AircraftId, AlError, SpokeId};
use thiserror::Error;

use crate::AircraftState;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("aircraft {0} not found")]
    AircraftNotFound(AircraftId),

    #[error("aircraft {0} is {1} and cannot take an assignment")]
    NotAvailable(AircraftId, AircraftState),

    #[error("assignment for aircraft {0} has no stops")]
    EmptyRoute(AircraftId),

    #[error("assignment for aircraft {aircraft} carries {requested} units, capacity is {capacity}")]
    CapacityExceeded { aircraft: AircraftId, requested: u32, capacity: u32 },

    #[error("assignment for aircraft {0} targets inactive spoke {1}")]
    InactiveSpoke(AircraftId, SpokeId),

    #[error("aircraft {0} is already broken or due for maintenance")]
    AlreadyBroken(AircraftId),

    #[error("aircraft {0} is not broken")]
    NotBroken(AircraftId),

    #[error(transparent)]
    Core(#[from] AlError),
}

pub type FleetResult<T> = Result<T, FleetError>;
