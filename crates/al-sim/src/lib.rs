//! `al-sim`: period scheduler for the airlift simulator.
//!
//! # Period loop
//!
//! ```text
//! for period in 0..config.periods:
//!   ① Abort      routes touching a retired spoke return to the hub.
//!   ② Rest       aircraft whose rest has ended become idle.
//!   ③ Ledger     arrivals, flags, PM upkeep, one op per spoke.
//!   ④ Dispatch   score and assign every idle aircraft (ascending id).
//!   ⑤ Advance    each aircraft spends one period of flight hours.
//!   ⑥ Close      fairness decay, incidents, observer, snapshot, clock.
//! ```
//!
//! # Step control
//!
//! | Method               | Effect                                        |
//! |----------------------|-----------------------------------------------|
//! | `step_one_period()`  | One period; returns its `Snapshot`.           |
//! | `run_headless(n)`    | `n` periods, no callbacks; returns summary.   |
//! | `run(observer)`      | Up to `config.periods` with callbacks.        |
//! | `reset()`            | Back to the freshly built state.              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs batch replications on Rayon's thread pool.        |
//! | `serde`    | Serde derives on snapshots, summaries, run records.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use al_core::AirliftConfig;
//! use al_sim::SimBuilder;
//!
//! let mut sim = SimBuilder::new(AirliftConfig::default()).build()?;
//! let summary = sim.run_headless(60);
//! println!("{} ops", summary.total_ops);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod scenario;
pub mod sim;
pub mod snapshot;
pub mod summary;

#[cfg(test)]
mod tests;

pub use batch::{RunRecord, run_batch, run_config_batch};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scenario::Scenario;
pub use sim::Sim;
pub use snapshot::{AircraftView, PeriodSummary, Snapshot, SpokeView};
pub use summary::{IncidentCounts, RunSummary};
