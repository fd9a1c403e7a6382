//! `al-dispatch`: the dispatch engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`stage`]    | `Stage` (A-priming, B-priming, OPS)                          |
//! | [`tables`]   | `ReservationTable`, `FairnessState`                          |
//! | [`context`]  | `DispatchContext<'a>`, `PassState`                           |
//! | [`scoring`]  | deficits, `need_score`, `ops_gain`, `score_candidates`       |
//! | [`payload`]  | `plan_payload`, `plan_pair_payload`                          |
//! | [`policy`]   | `TargetingPolicy` trait, `Selection`                         |
//! | [`smart`]    | `SmartTargeting`                                             |
//! | [`rotation`] | `PairRotation`                                               |
//! | [`engine`]   | `DispatchEngine`, `DispatchOutcome`                          |
//! | [`error`]    | `DispatchError`, `DispatchResult<T>`                         |
//!
//! # Determinism
//!
//! Idle aircraft are dispatched in ascending `AircraftId`; candidates are
//! scored in ascending `SpokeId` with one jitter draw each; ties after
//! jitter go to the lower spoke id.  The engine owns the only RNG.

pub mod context;
pub mod engine;
pub mod error;
pub mod payload;
pub mod policy;
pub mod rotation;
pub mod scoring;
pub mod smart;
pub mod stage;
pub mod tables;

#[cfg(test)]
mod tests;

pub use context::{DispatchContext, PassState};
pub use engine::{DispatchEngine, DispatchOutcome};
pub use error::{DispatchError, DispatchResult};
pub use policy::{Selection, TargetingPolicy};
pub use rotation::PairRotation;
pub use scoring::SpokeScore;
pub use smart::SmartTargeting;
pub use stage::Stage;
pub use tables::{FairnessState, ReservationTable};
