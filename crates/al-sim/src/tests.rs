//! Integration tests for al-sim.

use al_core::{AircraftId, AircraftSpec, AirliftConfig, Incident, LayoutSpec, Period, SpokeId, Stock};
use al_fleet::AircraftState;

use crate::{
    NoopObserver, PeriodSummary, RunSummary, Scenario, SimBuilder, SimError, SimObserver, Snapshot,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(periods: u64) -> AirliftConfig {
    AirliftConfig { periods, ..AirliftConfig::default() }
}

/// Ring so wide that a sortie cannot finish within one period.
fn wide_config() -> AirliftConfig {
    AirliftConfig {
        layout: LayoutSpec::Ring { spoke_count: 6, radius: 2000.0 },
        initial_stock: Stock::ZERO,
        ..AirliftConfig::default()
    }
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<Period>,
    ends:      Vec<PeriodSummary>,
    snapshots: Vec<Period>,
    incidents: Vec<Incident>,
    finished:  Option<RunSummary>,
}

impl SimObserver for Recorder {
    fn on_period_start(&mut self, period: Period) {
        self.starts.push(period);
    }
    fn on_incident(&mut self, incident: &Incident) {
        self.incidents.push(incident.clone());
    }
    fn on_period_end(&mut self, summary: &PeriodSummary) {
        self.ends.push(summary.clone());
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.period);
    }
    fn on_sim_end(&mut self, summary: &RunSummary) {
        self.finished = Some(summary.clone());
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(AirliftConfig::default()).build().unwrap();
        assert_eq!(sim.clock.current_period, Period(0));
        assert_eq!(sim.ledger().spoke_count(), 10);
        assert_eq!(sim.fleet().len(), 2);
        assert!(sim.snapshot().is_none());
    }

    #[test]
    fn empty_fleet_rejected() {
        let cfg = AirliftConfig { fleet: Vec::new(), ..AirliftConfig::default() };
        assert!(matches!(SimBuilder::new(cfg).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut spec = AircraftSpec::c130(1);
        spec.capacity = 0;
        let cfg = AirliftConfig { fleet: vec![spec], ..AirliftConfig::default() };
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn bad_pair_order_rejected() {
        let mut cfg = AirliftConfig::default();
        cfg.dispatch.pair_order = Some(vec![(0, 99)]);
        assert!(SimBuilder::new(cfg).build().is_err());
    }

    #[test]
    fn stock_count_mismatch_errors() {
        let result = SimBuilder::new(AirliftConfig::default())
            .initial_stocks(vec![Stock::ZERO; 3])
            .build();
        assert!(matches!(result, Err(SimError::SpokeCountMismatch { expected: 10, got: 3, .. })));
    }

    #[test]
    fn initial_stocks_applied() {
        let mut stocks = vec![Stock::splat(2); 10];
        stocks[4] = Stock::new(0, 1, 0, 1);
        let sim = SimBuilder::new(AirliftConfig::default()).initial_stocks(stocks).build().unwrap();
        assert_eq!(sim.ledger().stock(SpokeId(4)).unwrap(), Stock::new(0, 1, 0, 1));
        assert_eq!(sim.ledger().stock(SpokeId(0)).unwrap(), Stock::splat(2));
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn one_period_runs_one_op_per_stocked_spoke() {
        let mut sim = SimBuilder::new(AirliftConfig::default()).build().unwrap();
        let snap = sim.step_one_period();
        assert_eq!(snap.period, Period(0));
        assert_eq!(sim.clock.current_period, Period(1));
        assert_eq!(snap.spokes.len(), 10);
        assert_eq!(snap.aircraft.len(), 2);
        assert_eq!(snap.total_ops, 10);
        assert!(snap.spokes.iter().all(|s| s.ops_total == 1));
        assert_eq!(sim.snapshot(), Some(&snap));
    }

    #[test]
    fn deliveries_keep_ops_running() {
        let mut sim = SimBuilder::new(AirliftConfig::default()).build().unwrap();
        sim.step_one_period();
        let snap = sim.step_one_period();
        assert_eq!(snap.total_ops, 20);
        assert_eq!(snap.phase, al_core::Phase::Pm);
    }

    #[test]
    fn starved_network_primes_a_first() {
        let mut sim = SimBuilder::new(Scenario::Starved.config()).build().unwrap();
        let snap = sim.step_one_period();
        assert_eq!(snap.stage, al_dispatch::Stage::APriming);
        assert_eq!(snap.assignments.len(), 2);
        assert_ne!(snap.assignments[0].stops[0].spoke, snap.assignments[1].stops[0].spoke);
        assert_eq!(snap.total_ops, 0);

        // PM upkeep: only the two supplied spokes can pay.
        sim.step_one_period();
        let summary = sim.summary();
        assert_eq!(summary.shortages, 8);
        assert_eq!(summary.incidents.shortages, 8);
    }

    #[test]
    fn stock_never_underflows_and_ops_bounded() {
        let mut sim = SimBuilder::new(Scenario::FourC130.config()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_periods(40, &mut rec);
        assert_eq!(rec.ends.len(), 40);
        for s in &rec.ends {
            assert!(s.ops_run as usize <= 10);
        }
        assert_eq!(rec.incidents.iter().filter(|i| i.kind() == "resource_invariant_violation").count(), 0);
    }

    #[test]
    fn exhausted_hub_leaves_fleet_idle_without_incidents() {
        let cfg = AirliftConfig {
            initial_stock: Stock::ZERO,
            hub_supply: Some(Stock::splat(3)),
            ..AirliftConfig::default()
        };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let summary = sim.run_headless(20);

        assert!(summary.assignments >= 1);
        assert!(sim.ledger().hub_available().unwrap().total() < 12);
        assert_eq!(summary.fallbacks, 0);
        assert_eq!(summary.incidents.scheduling_inconsistencies, 0);
        assert!(sim.assignment_log().iter().all(|(_, a)| !a.fallback));
    }
}

// ── Runs, determinism and reset ───────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_configured_periods() {
        let mut cfg = test_config(6);
        cfg.output_interval_periods = 2;
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec);

        assert_eq!(summary.periods_run, 6);
        assert_eq!(rec.starts, (0..6).map(Period).collect::<Vec<_>>());
        assert_eq!(rec.snapshots, vec![Period(0), Period(2), Period(4)]);
        assert_eq!(rec.finished.as_ref(), Some(&summary));

        // Nothing left to run.
        let again = sim.run(&mut NoopObserver);
        assert_eq!(again.periods_run, 6);
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let cfg = Scenario::MixedFleet.config();
        let mut a = SimBuilder::new(cfg.clone()).build().unwrap();
        let mut b = SimBuilder::new(cfg).build().unwrap();
        let sa = a.run_headless(40);
        let sb = b.run_headless(40);
        assert_eq!(sa, sb);
        assert_eq!(a.assignment_log(), b.assignment_log());
        assert!(!a.assignment_log().is_empty());
    }

    #[test]
    fn reset_replays_the_same_run() {
        let mut sim = SimBuilder::new(Scenario::Starved.config()).build().unwrap();
        let first = sim.run_headless(30);
        let log = sim.assignment_log().to_vec();

        sim.reset();
        assert_eq!(sim.clock.current_period, Period(0));
        assert_eq!(sim.summary().total_ops, 0);
        assert!(sim.assignment_log().is_empty());

        let second = sim.run_headless(30);
        assert_eq!(first, second);
        assert_eq!(log, sim.assignment_log());
    }

    #[test]
    fn headless_matches_observed_run() {
        let cfg = test_config(20);
        let mut a = SimBuilder::new(cfg.clone()).build().unwrap();
        let mut b = SimBuilder::new(cfg).build().unwrap();
        let mut rec = Recorder::default();
        assert_eq!(a.run_headless(20), b.run(&mut rec));
    }
}

// ── External triggers ─────────────────────────────────────────────────────────

#[cfg(test)]
mod trigger_tests {
    use super::*;

    #[test]
    fn retired_spoke_aborts_inbound_aircraft() {
        let mut sim = SimBuilder::new(wide_config()).build().unwrap();
        let snap = sim.step_one_period();
        let target = snap.assignments[0].stops[0].spoke;
        let aircraft = snap.assignments[0].aircraft;
        assert!(sim.fleet().get(aircraft).unwrap().state.in_flight());

        sim.retire_spoke(target).unwrap();
        let mut rec = Recorder::default();
        sim.step(&mut rec);

        assert_eq!(sim.summary().incidents.route_aborts, 1);
        assert!(rec.incidents.iter().any(|i| matches!(
            i,
            Incident::AircraftRouteAbort { aircraft: a, spoke, .. } if *a == aircraft && *spoke == target
        )));
        assert!(!sim.ledger().is_active(target));
        let ac = sim.fleet().get(aircraft).unwrap();
        assert!(ac.route.iter().all(|s| s.spoke != target));
    }

    #[test]
    fn broken_aircraft_is_not_dispatched() {
        let mut sim = SimBuilder::new(Scenario::Starved.config()).build().unwrap();
        sim.break_aircraft(AircraftId(0)).unwrap();
        let snap = sim.step_one_period();
        assert_eq!(snap.count_in(AircraftState::BrokenAtHub), 1);
        assert!(snap.assignments.iter().all(|a| a.aircraft != AircraftId(0)));

        sim.repair_aircraft(AircraftId(0)).unwrap();
        assert_eq!(sim.fleet().get(AircraftId(0)).unwrap().state, AircraftState::IdleAtHub);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut sim = SimBuilder::new(AirliftConfig::default()).build().unwrap();
        assert!(matches!(sim.break_aircraft(AircraftId(9)), Err(SimError::Fleet(_))));
        assert!(matches!(sim.retire_spoke(SpokeId(99)), Err(SimError::Ledger(_))));
        assert!(sim.repair_aircraft(AircraftId(0)).is_err());
    }
}

// ── Scenarios and batches ─────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use crate::{RunRecord, run_batch};

    #[test]
    fn names_round_trip() {
        for sc in Scenario::ALL {
            assert_eq!(sc.name().parse::<Scenario>().unwrap(), sc);
        }
        assert_eq!("STARVED".parse::<Scenario>().unwrap(), Scenario::Starved);
        assert!(matches!("3xC5".parse::<Scenario>(), Err(SimError::UnknownScenario(_))));
    }

    #[test]
    fn presets() {
        assert_eq!(Scenario::FourC130.config().fleet_size(), 4);
        assert_eq!(Scenario::MixedFleet.config().fleet_size(), 4);
        assert_eq!(Scenario::Starved.config().initial_stock, Stock::ZERO);
        assert_eq!(Scenario::Stocked.config().initial_stock, Stock::splat(2));
    }

    #[test]
    fn stocked_network_tops_up_after_first_ops() {
        let mut sim = SimBuilder::new(Scenario::Stocked.config()).build().unwrap();
        let snap = sim.step_one_period();
        assert_eq!(snap.total_ops, 10);
        assert_eq!(snap.stage, al_dispatch::Stage::Ops);
        assert!(!snap.assignments.is_empty());
        for stop in snap.assignments.iter().flat_map(|a| &a.stops) {
            assert_eq!(stop.cargo.get(al_core::Resource::A), 0);
            assert_eq!(stop.cargo.get(al_core::Resource::B), 0);
        }
    }

    #[test]
    fn batch_is_ordered_and_reproducible() {
        let records = run_batch(Scenario::TwoC130, 3, 7).unwrap();
        assert_eq!(records.iter().map(|r| r.run).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(records[0].seed, 7);
        assert!(records.iter().all(|r| r.periods == 60));
        assert_eq!(records, run_batch(Scenario::TwoC130, 3, 7).unwrap());
    }

    #[test]
    fn first_run_matches_plain_headless_run() {
        let records = run_batch(Scenario::Starved, 1, 11).unwrap();
        let cfg = AirliftConfig { seed: 11, ..Scenario::Starved.config() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let summary = sim.run_headless(60);
        assert_eq!(records[0], RunRecord::from_summary(0, 11, &summary));
    }
}
