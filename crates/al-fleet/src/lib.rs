//! `al-fleet`: the aircraft state machine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`state`]    | `AircraftState`, `Leg`, `Stop`, `Assignment`, `FleetEvent`  |
//! | [`aircraft`] | `Aircraft`: one airframe's static data and lifecycle state |
//! | [`fleet`]    | `Fleet`: assignment, per-period advance, rest, maintenance |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                              |
//!
//! # Ownership
//!
//! The fleet is the only writer of aircraft state.  The dispatch engine reads
//! `&Fleet` and hands back [`Assignment`]s, which the scheduler applies with
//! [`Fleet::assign`].  Cargo flows hub → aircraft at assignment time and
//! aircraft → arrivals queue on arrival at each stop.

pub mod aircraft;
pub mod error;
pub mod fleet;
pub mod state;


pub use aircraft::Aircraft;
pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
pub use state::{AircraftState, Assignment, FleetEvent, Leg, Stop};
