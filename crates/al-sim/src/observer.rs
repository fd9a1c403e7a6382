//! Simulation observer trait for progress reporting and data collection.

use al_core::{Incident, Period};

use crate::{PeriodSummary, RunSummary, Snapshot};

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the period
/// loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Observers receive shared references or
/// owned copies only; they can never reach back into simulation state.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_period_end(&mut self, summary: &PeriodSummary) {
///         if summary.period.0 % self.interval == 0 {
///             println!("{}: {} ops", summary.period, summary.cumulative_ops);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each period, before any processing.
    fn on_period_start(&mut self, _period: Period) {}

    /// Called for every incident recorded during the period, in the order
    /// they occurred.
    fn on_incident(&mut self, _incident: &Incident) {}

    /// Called at the end of each period with its counters.
    fn on_period_end(&mut self, _summary: &PeriodSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_periods`
    /// periods).
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after [`Sim::run`][crate::Sim::run] finishes.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
