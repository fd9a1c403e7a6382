//! `al-core`: foundational types for the `airlift` hub-and-spoke simulator.
//!
//! This crate is a dependency of every other `al-*` crate.  It has no `al-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SpokeId`, `AircraftId`, `NodeRef`                    |
//! | [`geo`]         | `Point`, ring layout                                  |
//! | [`time`]        | `Period`, `Phase`, `SimClock`                         |
//! | [`rng`]         | `SimRng`, batch `run_seed`                            |
//! | [`resource`]    | `Resource`, `Stock`                                   |
//! | [`config`]      | `AirliftConfig` and its sections, validation          |
//! | [`incident`]    | `Incident`                                            |
//! | [`error`]       | `AlError`, `AlResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types, so a   |
//! |         | configuration can be loaded from JSON.                     |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod incident;
pub mod resource;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AircraftSpec, AirliftConfig, DispatchConfig, DispatchMode, FlightTiming, LayoutSpec,
    ResourceTargets,
};
pub use error::{AlError, AlResult};
pub use geo::Point;
pub use ids::{AircraftId, NodeRef, SpokeId};
pub use incident::Incident;
pub use resource::{Resource, Stock};
pub use rng::{SimRng, run_seed};
pub use time::{Period, Phase, SimClock};
