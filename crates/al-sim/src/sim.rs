//! The `Sim` struct and its period loop.

use tracing::{debug, info};

use al_core::{AircraftId, AirliftConfig, Period, SimClock, SpokeId};
use al_dispatch::DispatchEngine;
use al_fleet::{Assignment, Fleet, FleetEvent};
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::{
    IncidentCounts, NoopObserver, PeriodSummary, RunSummary, SimObserver, SimResult, Snapshot,
};

/// Everything `reset` restores.
#[derive(Clone)]
struct World {
    ledger: ResourceLedger,
    fleet:  Fleet,
    engine: DispatchEngine,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` holds all simulation state and drives the period loop:
///
/// 1. **Abort**: aircraft whose route touches a retired spoke return to the
///    hub with their cargo.
/// 2. **Rest**: aircraft whose rest has ended become available.
/// 3. **Ledger**: arrivals, operational flags, PM upkeep, operations.
/// 4. **Dispatch**: one assignment pass over idle aircraft.
/// 5. **Advance**: every aircraft spends one period of flight hours.
/// 6. **Close**: fairness decay, incidents and counters to the observer,
///    snapshot at the output interval, clock advance.
///
/// Each period runs to completion before the next begins; nothing inside a
/// period blocks or fails.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Validated configuration.
    pub config: AirliftConfig,

    /// The period the next step will simulate.
    pub clock: SimClock,

    distances: DistanceModel,
    world:     World,
    initial:   World,

    assignment_log: Vec<(Period, Assignment)>,
    incidents:      IncidentCounts,
    fallbacks:      u32,
    last_snapshot:  Option<Snapshot>,
}

impl Sim {
    pub(crate) fn assemble(
        config:    AirliftConfig,
        distances: DistanceModel,
        ledger:    ResourceLedger,
        fleet:     Fleet,
        engine:    DispatchEngine,
    ) -> Self {
        let world = World { ledger, fleet, engine };
        Self {
            config,
            clock: SimClock::new(),
            distances,
            initial: world.clone(),
            world,
            assignment_log: Vec::new(),
            incidents: IncidentCounts::default(),
            fallbacks: 0,
            last_snapshot: None,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn ledger(&self) -> &ResourceLedger {
        &self.world.ledger
    }

    pub fn fleet(&self) -> &Fleet {
        &self.world.fleet
    }

    pub fn engine(&self) -> &DispatchEngine {
        &self.world.engine
    }

    pub fn distances(&self) -> &DistanceModel {
        &self.distances
    }

    /// Every route handed out since the last build or reset, in order.
    pub fn assignment_log(&self) -> &[(Period, Assignment)] {
        &self.assignment_log
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Totals since the last build or reset.
    pub fn summary(&self) -> RunSummary {
        let ledger = &self.world.ledger;
        RunSummary {
            periods_run:  self.clock.periods_elapsed(),
            total_ops:    ledger.total_ops(),
            ops_by_spoke: ledger.ops_by_spoke(),
            final_stock:  ledger.spokes().iter().map(|s| s.stock).collect(),
            shortages:    ledger.spokes().iter().map(|s| s.shortages as u64).sum(),
            incidents:    self.incidents,
            assignments:  self.assignment_log.len(),
            fallbacks:    self.fallbacks,
        }
    }

    // ── Step control ──────────────────────────────────────────────────────

    /// Simulate exactly one period and return its snapshot.
    pub fn step_one_period(&mut self) -> Snapshot {
        self.step(&mut NoopObserver)
    }

    /// Simulate one period with observer callbacks and return its snapshot.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> Snapshot {
        let period = self.clock.current_period;
        self.process_period(observer, true).unwrap_or_else(|| self.capture(period, Vec::new()))
    }

    /// Run `n` periods in a tight loop without callbacks.
    pub fn run_headless(&mut self, n: u64) -> RunSummary {
        self.run_periods(n, &mut NoopObserver)
    }

    /// Run from the current period to `config.periods`.
    ///
    /// Calls observer hooks at every period boundary and `on_sim_end` once.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunSummary {
        let remaining = self.config.periods.saturating_sub(self.clock.periods_elapsed());
        let summary = self.run_periods(remaining, observer);
        observer.on_sim_end(&summary);
        summary
    }

    /// Run exactly `n` periods from the current position (ignores
    /// `config.periods`).
    pub fn run_periods<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> RunSummary {
        for _ in 0..n {
            self.process_period(observer, false);
        }
        self.summary()
    }

    /// Return to the state right after `build`: stock, fleet, dispatch
    /// state, RNG, clock and counters.
    pub fn reset(&mut self) {
        self.world = self.initial.clone();
        self.clock = SimClock::new();
        self.assignment_log.clear();
        self.incidents = IncidentCounts::default();
        self.fallbacks = 0;
        self.last_snapshot = None;
        info!(seed = self.config.seed, "simulation reset");
    }

    // ── External triggers ─────────────────────────────────────────────────

    /// Take a spoke out of service.  Aircraft routed through it abort at
    /// the start of the next period.
    pub fn retire_spoke(&mut self, id: SpokeId) -> SimResult<()> {
        self.world.ledger.retire_spoke(id)?;
        info!(spoke = %id, period = %self.clock.current_period, "spoke retired");
        Ok(())
    }

    /// Maintenance event for one aircraft.
    pub fn break_aircraft(&mut self, id: AircraftId) -> SimResult<Vec<FleetEvent>> {
        let now = self.clock.current_period;
        let World { ledger, fleet, .. } = &mut self.world;
        Ok(fleet.break_aircraft(id, now, ledger)?)
    }

    pub fn repair_aircraft(&mut self, id: AircraftId) -> SimResult<Vec<FleetEvent>> {
        Ok(self.world.fleet.repair_aircraft(id, &self.distances)?)
    }

    // ── Core period processing ────────────────────────────────────────────

    fn capture(&self, period: Period, assignments: Vec<Assignment>) -> Snapshot {
        let World { ledger, fleet, engine } = &self.world;
        Snapshot::capture(period, ledger, fleet, engine, assignments)
    }

    fn process_period<O: SimObserver>(&mut self, observer: &mut O, force_snapshot: bool) -> Option<Snapshot> {
        let now = self.clock.current_period;
        let World { ledger, fleet, engine } = &mut self.world;
        observer.on_period_start(now);

        // ── Phase 1: abort routes through retired spokes ──────────────────
        let mut incidents = fleet.abort_invalid_legs(now, ledger);

        // ── Phase 2: release rested aircraft ──────────────────────────────
        fleet.begin_period(now);

        // ── Phase 3: ledger pipeline ──────────────────────────────────────
        let report = ledger.run_period(now, self.config.upkeep_interval_days);

        // ── Phase 4: dispatch pass ────────────────────────────────────────
        let outcome = engine.dispatch(now, ledger, fleet, &self.distances);

        // ── Phase 5: advance aircraft ─────────────────────────────────────
        fleet.advance(now, &self.config.timing, &self.distances, ledger);

        // ── Phase 6: close the period ─────────────────────────────────────
        engine.end_period();
        incidents.extend(ledger.take_incidents());
        incidents.extend(outcome.incidents);

        for incident in &incidents {
            self.incidents.record(incident);
            observer.on_incident(incident);
        }
        self.fallbacks += outcome.fallbacks;
        self.assignment_log
            .extend(outcome.assignments.iter().map(|a| (now, a.clone())));

        let mut summary = PeriodSummary::new(now, &report);
        summary.stage = outcome.stage;
        summary.assignments = outcome.assignments.len();
        summary.fallbacks = outcome.fallbacks;
        summary.incidents = incidents.len();
        summary.operational = ledger.spokes().iter().filter(|s| s.operational).count();
        summary.cumulative_ops = ledger.total_ops();
        debug!(
            period = %now,
            stage = ?outcome.stage,
            ops = report.ops_run,
            assigned = summary.assignments,
            incidents = summary.incidents,
            "period complete"
        );
        observer.on_period_end(&summary);

        let interval = self.config.output_interval_periods;
        let due = interval > 0 && now.0.is_multiple_of(interval);
        let snapshot = if due || force_snapshot {
            let snap = Snapshot::capture(now, ledger, fleet, engine, outcome.assignments);
            if due {
                observer.on_snapshot(&snap);
            }
            self.last_snapshot = Some(snap.clone());
            Some(snap)
        } else {
            None
        };

        self.clock.advance();
        snapshot
    }
}
