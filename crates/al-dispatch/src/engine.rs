//! `DispatchEngine`: one assignment pass per period.
//!
//! # Pass
//!
//! ```text
//! begin: reset reservations, detect stage, project inbound cargo
//! for aircraft in fleet.idle_aircraft()            (ascending AircraftId)
//!     select  → Route | Idle | Unresolved
//!     Unresolved (smart mode) → log + Incident, retry with pair rotation
//!     Route   → reserve, credit fairness, project cargo, fleet.assign
//! end_period: decay fairness of spokes not serviced
//! ```
//!
//! The engine owns the single simulation RNG, so every jitter draw happens
//! in the fixed order above and a seed fully determines the decisions.

use tracing::{debug, warn};

use al_core::{
    AircraftId, AirliftConfig, DispatchConfig, DispatchMode, Incident, Period, ResourceTargets,
    SimRng,
};
use al_fleet::{Assignment, Fleet};
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::{
    DispatchContext, DispatchError, DispatchResult, FairnessState, PairRotation, PassState,
    ReservationTable, Selection, SmartTargeting, SpokeScore, Stage, TargetingPolicy,
};

/// Result of one pass.
#[derive(Clone, Debug, Default)]
pub struct DispatchOutcome {
    pub stage:       Option<Stage>,
    /// Assignments accepted by the fleet, in dispatch order.
    pub assignments: Vec<Assignment>,
    /// Score of each chosen stop, parallel to `assignments` (empty for
    /// pair-rotation routes).
    pub scores:      Vec<Vec<SpokeScore>>,
    pub incidents:   Vec<Incident>,
    pub fallbacks:   u32,
}

/// Owns all dispatch state that outlives a single pass.
#[derive(Clone)]
pub struct DispatchEngine {
    config:       DispatchConfig,
    targets:      ResourceTargets,
    smart:        SmartTargeting,
    rotation:     PairRotation,
    reservations: ReservationTable,
    fairness:     FairnessState,
    rng:          SimRng,
    stage:        Stage,
}

impl DispatchEngine {
    pub fn new(config: &AirliftConfig) -> DispatchResult<Self> {
        let spoke_count = config.spoke_count();
        let pairs = config.pair_order();
        if let Some((index, &(a, b))) = pairs
            .iter()
            .enumerate()
            .find(|(_, (a, b))| a.index() >= spoke_count || b.index() >= spoke_count)
        {
            return Err(DispatchError::PairOutOfRange { index, first: a.0, second: b.0, spoke_count });
        }
        Ok(Self {
            config:       config.dispatch.clone(),
            targets:      config.resource_targets(),
            smart:        SmartTargeting,
            rotation:     PairRotation::new(pairs),
            reservations: ReservationTable::new(spoke_count),
            fairness:     FairnessState::new(spoke_count),
            rng:          SimRng::new(config.seed),
            stage:        Stage::Ops,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Reservations made by the most recent pass.
    pub fn reservations(&self) -> &ReservationTable {
        &self.reservations
    }

    pub fn fairness(&self) -> &FairnessState {
        &self.fairness
    }

    /// Stage detected by the most recent pass.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn targets(&self) -> &ResourceTargets {
        &self.targets
    }

    pub fn rotation(&self) -> &PairRotation {
        &self.rotation
    }

    // ── Pass ──────────────────────────────────────────────────────────────

    /// Route every idle aircraft and hand the routes to the fleet.
    ///
    /// Never fails: unresolved selections fall back to pair rotation, and a
    /// route the fleet refuses is logged as an incident and dropped.
    pub fn dispatch(
        &mut self,
        period:    Period,
        ledger:    &mut ResourceLedger,
        fleet:     &mut Fleet,
        distances: &DistanceModel,
    ) -> DispatchOutcome {
        let reservations = std::mem::take(&mut self.reservations);
        let mut pass = PassState::begin(ledger, fleet, reservations);
        self.stage = pass.stage;
        self.smart.begin_period();
        self.rotation.begin_period();

        let mut outcome = DispatchOutcome { stage: Some(pass.stage), ..Default::default() };
        for id in fleet.idle_aircraft() {
            let Some((selection, fallback)) = self.select_for(id, period, &pass, ledger, fleet, distances, &mut outcome)
            else {
                continue;
            };
            let Selection::Route { stops, scores } = selection else { continue };

            let assignment = Assignment { aircraft: id, stops, fallback };
            match fleet.assign(&assignment, ledger) {
                Ok(()) => {
                    for stop in &assignment.stops {
                        pass.commit(stop.spoke, stop.cargo);
                        self.fairness.record_service(stop.spoke);
                    }
                    outcome.assignments.push(assignment);
                    outcome.scores.push(scores);
                }
                Err(e) => {
                    warn!(aircraft = %id, period = %period, error = %e, "route rejected by fleet");
                    outcome.incidents.push(Incident::SchedulingInconsistency {
                        period,
                        aircraft: id,
                        detail: e.to_string(),
                    });
                }
            }
        }

        debug!(
            period = %period,
            stage = %pass.stage,
            assigned = outcome.assignments.len(),
            reserved = pass.reservations.total(),
            "dispatch pass"
        );
        self.reservations = pass.reservations;
        outcome
    }

    /// Ask the configured policy (and the fallback, if needed) for a route.
    #[allow(clippy::too_many_arguments)]
    fn select_for(
        &mut self,
        id:        AircraftId,
        period:    Period,
        pass:      &PassState,
        ledger:    &ResourceLedger,
        fleet:     &Fleet,
        distances: &DistanceModel,
        outcome:   &mut DispatchOutcome,
    ) -> Option<(Selection, bool)> {
        let aircraft = fleet.get(id).ok()?;
        let ctx = DispatchContext {
            period,
            config: &self.config,
            targets: self.targets,
            ledger,
            fleet,
            distances,
            fairness: &self.fairness,
        };

        let selection = match self.config.mode {
            DispatchMode::PairRotation => {
                return Some((self.rotation.select(aircraft, pass, &ctx, &mut self.rng), false));
            }
            DispatchMode::Smart => self.smart.select(aircraft, pass, &ctx, &mut self.rng),
        };
        let Selection::Unresolved(detail) = selection else {
            return Some((selection, false));
        };

        warn!(aircraft = %aircraft.name, period = %period, %detail, "smart targeting unresolved, using pair rotation");
        outcome.fallbacks += 1;
        outcome.incidents.push(Incident::SchedulingInconsistency { period, aircraft: id, detail });
        Some((self.rotation.select(aircraft, pass, &ctx, &mut self.rng), true))
    }

    /// Close the period: decay fairness for spokes not serviced.
    pub fn end_period(&mut self) {
        self.fairness.end_period(self.config.fairness_decay);
    }
}
