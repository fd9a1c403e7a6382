//! Batch replications: one independent run per derived seed.
//!
//! Each run builds its own [`Sim`](crate::Sim), so runs share nothing.  With
//! the `parallel` feature they execute on Rayon's pool; either way records
//! come back ordered by run index, and a given `(config, base_seed)` always
//! yields the same records.

use tracing::info;

use al_core::{AirliftConfig, run_seed};

use crate::{NoopObserver, RunSummary, Scenario, SimBuilder, SimResult};

/// Result of one batch run, suitable for aggregation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub run:                u32,
    pub seed:               u64,
    pub periods:            u64,
    pub total_ops:          u64,
    pub ops_by_spoke:       Vec<u64>,
    /// Spokes able to run an operation at the end of the run.
    pub operational_spokes: usize,
    pub shortages:          u64,
    pub assignments:        usize,
    pub fallbacks:          u32,
    pub incidents:          u32,
}

impl RunRecord {
    pub fn from_summary(run: u32, seed: u64, summary: &RunSummary) -> Self {
        Self {
            run,
            seed,
            periods:            summary.periods_run,
            total_ops:          summary.total_ops,
            ops_by_spoke:       summary.ops_by_spoke.clone(),
            operational_spokes: summary.operational_spokes(),
            shortages:          summary.shortages,
            assignments:        summary.assignments,
            fallbacks:          summary.fallbacks,
            incidents:          summary.incidents.total(),
        }
    }
}

/// Run a named scenario `runs` times.
pub fn run_batch(scenario: Scenario, runs: u32, base_seed: u64) -> SimResult<Vec<RunRecord>> {
    info!(%scenario, runs, base_seed, "batch start");
    run_config_batch(&scenario.config(), runs, base_seed)
}

/// Run `config` `runs` times, run `i` seeded with `run_seed(base_seed, i)`.
///
/// Fails only if the configuration is rejected.
pub fn run_config_batch(config: &AirliftConfig, runs: u32, base_seed: u64) -> SimResult<Vec<RunRecord>> {
    #[cfg(not(feature = "parallel"))]
    {
        (0..runs).map(|run| run_one(config, run, base_seed)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..runs)
            .into_par_iter()
            .map(|run| run_one(config, run, base_seed))
            .collect()
    }
}

fn run_one(config: &AirliftConfig, run: u32, base_seed: u64) -> SimResult<RunRecord> {
    let seed = run_seed(base_seed, run);
    let mut sim = SimBuilder::new(AirliftConfig { seed, ..config.clone() }).build()?;
    let summary = sim.run(&mut NoopObserver);
    Ok(RunRecord::from_summary(run, seed, &summary))
}
