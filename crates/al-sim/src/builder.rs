//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use al_core::{AirliftConfig, AlError, SpokeId, Stock};
use al_dispatch::DispatchEngine;
use al_fleet::Fleet;
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`AirliftConfig`]: layout, fleet, stock, dispatch weights, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                              |
/// |-------------------------|--------------------------------------|
/// | `.initial_stocks(v)`    | Every spoke gets `initial_stock`     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(AirliftConfig::default()).build()?;
/// let summary = sim.run_headless(60);
/// ```
pub struct SimBuilder {
    config: AirliftConfig,
    stocks: Option<Vec<Stock>>,
}

impl SimBuilder {
    pub fn new(config: AirliftConfig) -> Self {
        Self { config, stocks: None }
    }

    /// Per-spoke starting stock (must be length `spoke_count`).
    ///
    /// Overrides `config.initial_stock` for an uneven start, e.g. a single
    /// starved spoke in an otherwise stocked network.
    pub fn initial_stocks(mut self, stocks: Vec<Stock>) -> Self {
        self.stocks = Some(stocks);
        self
    }

    /// Validate the configuration, resolve derived values, and return a
    /// ready-to-run [`Sim`] at period 0.
    ///
    /// This is the only place a run can be refused; nothing after the first
    /// tick returns an error.
    pub fn build(self) -> SimResult<Sim> {
        let config = self.config;
        config.validate().map_err(|e| match e {
            AlError::Config(msg) => SimError::Config(msg),
            other => SimError::Core(other),
        })?;

        let distances = DistanceModel::from_layout(&config.layout, config.dispatch.distance_normalizer)?;
        let engine = DispatchEngine::new(&config)?;

        let mut ledger = ResourceLedger::from_config(&config);
        if let Some(stocks) = self.stocks {
            if stocks.len() != config.spoke_count() {
                return Err(SimError::SpokeCountMismatch {
                    expected: config.spoke_count(),
                    got:      stocks.len(),
                    what:     "initial stocks",
                });
            }
            for (i, stock) in stocks.into_iter().enumerate() {
                ledger.set_stock(SpokeId(i as u32), stock)?;
            }
        }

        let hub = distances.position(al_core::NodeRef::Hub);
        let fleet = Fleet::from_config(&config, hub);

        info!(
            spokes = config.spoke_count(),
            aircraft = fleet.len(),
            seed = config.seed,
            normalizer = distances.normalizer(),
            targets = %engine.targets().0,
            "simulation built"
        );
        Ok(Sim::assemble(config, distances, ledger, fleet, engine))
    }
}
