//! Unit tests for al-dispatch.

use al_core::{
    AircraftSpec, AirliftConfig, LayoutSpec, Period, Point, ResourceTargets, SpokeId, Stock,
};
use al_fleet::Fleet;
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::{DispatchEngine, DispatchOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    ledger:    ResourceLedger,
    fleet:     Fleet,
    distances: DistanceModel,
    engine:    DispatchEngine,
    config:    AirliftConfig,
}

fn world(config: AirliftConfig) -> World {
    let (hub, spokes) = config.layout.positions();
    World {
        ledger:    ResourceLedger::new(&spokes, config.initial_stock, config.hub_supply),
        fleet:     Fleet::from_config(&config, hub),
        distances: DistanceModel::from_layout(&config.layout, None).unwrap(),
        engine:    DispatchEngine::new(&config).unwrap(),
        config,
    }
}

/// Hub plus three spokes on a ring of radius 100.
fn three_spokes(fleet: AircraftSpec, initial: Stock) -> AirliftConfig {
    AirliftConfig {
        layout: LayoutSpec::Ring { spoke_count: 3, radius: 100.0 },
        fleet: vec![fleet],
        initial_stock: initial,
        ..AirliftConfig::default()
    }
}

impl World {
    fn dispatch(&mut self, period: u64) -> DispatchOutcome {
        self.engine.dispatch(Period(period), &mut self.ledger, &mut self.fleet, &self.distances)
    }

    /// One full period in scheduler order.
    fn step(&mut self, period: u64) -> DispatchOutcome {
        let p = Period(period);
        self.ledger.run_period(p, self.config.upkeep_interval_days);
        self.fleet.begin_period(p);
        let out = self.dispatch(period);
        self.fleet.advance(p, &self.config.timing, &self.distances, &mut self.ledger);
        self.engine.end_period();
        out
    }
}

fn targets(n: u32) -> ResourceTargets {
    ResourceTargets(Stock::splat(n))
}

// ── Stage ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stage {
    use super::*;
    use crate::Stage;

    #[test]
    fn a_priming_wins_over_b() {
        let mut l = ResourceLedger::new(&[Point::ORIGIN, Point::ORIGIN], Stock::splat(1), None);
        assert_eq!(Stage::detect(&l), Stage::Ops);
        l.set_stock(SpokeId(1), Stock::new(1, 0, 1, 1)).unwrap();
        assert_eq!(Stage::detect(&l), Stage::BPriming);
        l.set_stock(SpokeId(0), Stock::new(0, 1, 1, 1)).unwrap();
        assert_eq!(Stage::detect(&l), Stage::APriming);
    }

    #[test]
    fn retired_spokes_do_not_drive_stage() {
        let mut l = ResourceLedger::new(&[Point::ORIGIN, Point::ORIGIN], Stock::splat(1), None);
        l.set_stock(SpokeId(1), Stock::ZERO).unwrap();
        l.retire_spoke(SpokeId(1)).unwrap();
        assert_eq!(Stage::detect(&l), Stage::Ops);
    }
}

// ── Scoring terms ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod scoring {
    use super::*;
    use crate::Stage;
    use crate::scoring::{deficit_fractions, need_score, ops_gain, ranked};
    use crate::SpokeScore;

    #[test]
    fn deficits_are_fractions_of_target() {
        let d = deficit_fractions(Stock::new(0, 1, 2, 5), &targets(2));
        assert_eq!(d, [1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn ops_gain_follows_stage() {
        let d = [1.0, 0.5, 0.25, 0.75];
        assert_eq!(ops_gain(Stage::APriming, &d), 1.0);
        assert_eq!(ops_gain(Stage::BPriming, &d), 0.5);
        assert_eq!(ops_gain(Stage::Ops, &d), 0.5);
    }

    #[test]
    fn need_is_weighted_mean() {
        let d = [1.0, 0.0, 0.0, 0.0];
        assert_eq!(need_score(&d, &[1.0; 4]), 0.25);
        assert_eq!(need_score(&d, &[3.0, 1.0, 0.0, 0.0]), 0.75);
        assert_eq!(need_score(&d, &[0.0; 4]), 0.0);
    }

    #[test]
    fn ranking_drops_non_finite_and_breaks_ties_by_spoke() {
        let mk = |spoke, total| SpokeScore {
            spoke: SpokeId(spoke),
            ops_gain: 0.0,
            need: 0.0,
            dist_norm: 0.0,
            congestion: 0.0,
            fairness: 0.0,
            jitter: 0.0,
            total,
        };
        let r = ranked(&[mk(2, 0.5), mk(0, f64::NAN), mk(1, 0.5), mk(3, 0.9)]);
        let order: Vec<u32> = r.iter().map(|s| s.spoke.0).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}

// ── Payload ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod payload {
    use super::*;
    use crate::Stage;
    use crate::payload::{plan_pair_payload, plan_payload};

    #[test]
    fn fills_in_stage_priority_order() {
        let p = plan_payload(Stock::ZERO, &targets(2), Stage::Ops, 5, None);
        assert_eq!(p, Stock::new(1, 0, 2, 2));
        let p = plan_payload(Stock::ZERO, &targets(2), Stage::BPriming, 3, None);
        assert_eq!(p, Stock::new(1, 2, 0, 0));
    }

    #[test]
    fn bounded_by_hub_supply() {
        let hub = Some(Stock::new(0, 1, 9, 9));
        let p = plan_payload(Stock::ZERO, &targets(2), Stage::APriming, 6, hub);
        assert_eq!(p, Stock::new(0, 1, 2, 2));
    }

    #[test]
    fn full_spoke_gets_nothing() {
        assert!(plan_payload(Stock::splat(2), &targets(2), Stage::Ops, 6, None).is_empty());
    }

    #[test]
    fn pair_fill_tops_up_to_one_then_two() {
        let (a, b) = plan_pair_payload(Stock::ZERO, Stock::ZERO, Stage::APriming, 6, None);
        assert_eq!(a, Stock::new(2, 1, 0, 0));
        assert_eq!(b, Stock::new(2, 1, 0, 0));

        let (a, b) = plan_pair_payload(Stock::new(2, 2, 0, 1), Stock::new(2, 2, 2, 2), Stage::Ops, 6, None);
        assert_eq!(a, Stock::new(0, 0, 2, 1));
        assert!(b.is_empty());
    }

    #[test]
    fn pair_fill_respects_capacity() {
        let (a, b) = plan_pair_payload(Stock::ZERO, Stock::ZERO, Stage::Ops, 3, None);
        assert_eq!(a, Stock::new(0, 0, 1, 1));
        assert_eq!(b, Stock::new(0, 0, 1, 0));
    }
}

// ── Tables ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tables {
    use super::*;
    use crate::{FairnessState, ReservationTable};

    #[test]
    fn reservation_cap() {
        let mut t = ReservationTable::new(2);
        assert!(!t.is_capped(SpokeId(0), Some(1)));
        t.reserve(SpokeId(0));
        assert!(t.is_capped(SpokeId(0), Some(1)));
        assert!(!t.is_capped(SpokeId(0), None));
        assert_eq!(t.total(), 1);
        t.reset();
        assert_eq!(t.total(), 0);
    }

    #[test]
    fn fairness_rises_when_serviced_and_decays_otherwise() {
        let mut f = FairnessState::new(2);
        f.record_service(SpokeId(0));
        f.record_service(SpokeId(0));
        f.end_period(0.8);
        assert_eq!(f.recent(SpokeId(0)), 2.0);
        assert!((f.penalty(SpokeId(0), 0.8) - 0.4).abs() < 1e-12);

        f.end_period(0.8);
        assert!((f.recent(SpokeId(0)) - 1.6).abs() < 1e-12);
        f.end_period(0.8);
        assert!(f.recent(SpokeId(0)) < 1.6);
        assert_eq!(f.recent(SpokeId(1)), 0.0);
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use std::collections::BTreeSet;

    use al_core::{DispatchMode, Incident};
    use al_fleet::AircraftState;

    use super::*;
    use crate::DispatchError;

    #[test]
    fn two_aircraft_cover_two_distinct_spokes() {
        let mut cfg = three_spokes(AircraftSpec::c130(2), Stock::new(0, 2, 2, 2));
        cfg.dispatch.two_leg_routes = false;
        let mut w = world(cfg);

        let out = w.dispatch(0);
        assert_eq!(out.assignments.len(), 2);
        let spokes: BTreeSet<SpokeId> = out.assignments.iter().map(|a| a.stops[0].spoke).collect();
        assert_eq!(spokes.len(), 2);
        assert_eq!(w.engine.reservations().total(), 2);
        for a in &out.assignments {
            assert_eq!(a.stops[0].cargo, Stock::new(2, 0, 0, 0));
            assert!(!a.fallback);
        }
    }

    #[test]
    fn fully_stocked_network_stays_idle() {
        let mut w = world(three_spokes(AircraftSpec::c130(2), Stock::splat(2)));
        let out = w.dispatch(0);
        assert!(out.assignments.is_empty());
        assert!(out.incidents.is_empty());
        assert_eq!(w.fleet.count_in(AircraftState::IdleAtHub), 2);
        assert_eq!(w.engine.reservations().total(), 0);
    }

    #[test]
    fn cap_limits_aircraft_per_spoke() {
        let setup = |cap: Option<u32>| {
            let mut cfg = three_spokes(AircraftSpec::c27(3), Stock::splat(2));
            cfg.dispatch.max_aircraft_per_spoke_per_period = cap;
            let mut w = world(cfg);
            w.ledger.set_stock(SpokeId(0), Stock::ZERO).unwrap();
            w
        };

        let mut capped = setup(Some(1));
        let out = capped.dispatch(0);
        assert_eq!(out.assignments.len(), 1);
        assert_eq!(capped.engine.reservations().count(SpokeId(0)), 1);

        let mut open = setup(None);
        let out = open.dispatch(0);
        assert_eq!(out.assignments.len(), 3);
        assert_eq!(open.engine.reservations().count(SpokeId(0)), 3);
    }

    #[test]
    fn second_leg_to_nearby_spoke() {
        let cfg = AirliftConfig {
            layout: LayoutSpec::Explicit {
                hub:    Point::ORIGIN,
                spokes: vec![Point::new(100.0, 0.0), Point::new(100.0, 20.0), Point::new(100.0, -20.0)],
            },
            fleet: vec![AircraftSpec::c130(1)],
            initial_stock: Stock::new(0, 2, 2, 2),
            ..AirliftConfig::default()
        };
        let mut w = world(cfg);
        let out = w.dispatch(0);
        assert_eq!(out.assignments.len(), 1);
        let stops = &out.assignments[0].stops;
        assert_eq!(stops.len(), 2);
        assert_ne!(stops[0].spoke, stops[1].spoke);
        assert_eq!(stops[1].cargo, Stock::new(2, 0, 0, 0));
        assert_eq!(w.engine.reservations().total(), 2);
        assert!(out.scores[0][1].total > 0.1);
    }

    #[test]
    fn far_second_leg_rejected() {
        // Ring of 3: spoke-to-spoke distance is the normalizer, so the
        // discounted benefit barely beats the distance penalty.
        let w_cfg = three_spokes(AircraftSpec::c130(1), Stock::new(0, 2, 2, 2));
        let mut w = world(w_cfg);
        let out = w.dispatch(0);
        assert_eq!(out.assignments[0].stops.len(), 1);
    }

    #[test]
    fn second_leg_multiplier_discounts_benefit() {
        // Ring of 3: second-leg benefit 1.15·m against a distance penalty of 0.8.
        let stops_with = |multiplier: f64| {
            let mut cfg = three_spokes(AircraftSpec::c130(1), Stock::new(0, 2, 2, 2));
            cfg.dispatch.second_leg_multiplier = multiplier;
            let mut w = world(cfg);
            w.dispatch(0).assignments[0].stops.len()
        };
        assert_eq!(stops_with(1.0), 2);
        assert_eq!(stops_with(0.2), 1);
    }

    /// Ring of 4, empty stock, four aircraft, overlapping pairs, cap of one.
    fn capped_rotation_world(mode: DispatchMode) -> World {
        let mut cfg = AirliftConfig {
            layout: LayoutSpec::Ring { spoke_count: 4, radius: 100.0 },
            fleet: vec![AircraftSpec::c130(4)],
            initial_stock: Stock::ZERO,
            ..AirliftConfig::default()
        };
        cfg.dispatch.mode = mode;
        cfg.dispatch.max_aircraft_per_spoke_per_period = Some(1);
        cfg.dispatch.pair_order = Some(vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
        world(cfg)
    }

    fn assert_cap_held(w: &World, out: &DispatchOutcome) {
        let mut visits = [0u32; 4];
        for a in &out.assignments {
            for stop in &a.stops {
                visits[stop.spoke.index()] += 1;
            }
        }
        assert!(visits.iter().all(|&v| v <= 1), "visits {visits:?}");
        for s in 0..4 {
            assert!(w.engine.reservations().count(SpokeId(s)) <= 1);
        }
    }

    #[test]
    fn pair_rotation_respects_cap() {
        let mut w = capped_rotation_world(DispatchMode::PairRotation);
        let out = w.dispatch(0);
        assert_eq!(out.assignments.len(), 3);
        assert_eq!(out.assignments[1].stops.len(), 1);
        assert_eq!(out.assignments[1].stops[0].spoke, SpokeId(2));
        assert_cap_held(&w, &out);
        assert_eq!(w.fleet.count_in(AircraftState::IdleAtHub), 1);
    }

    #[test]
    fn fallback_rotation_respects_cap() {
        let mut w = capped_rotation_world(DispatchMode::Smart);
        w.engine = {
            let mut cfg = w.config.clone();
            cfg.dispatch.w_dist = f64::INFINITY;
            DispatchEngine::new(&cfg).unwrap()
        };
        let out = w.dispatch(0);
        assert_eq!(out.fallbacks, 3);
        assert_eq!(out.assignments.len(), 3);
        assert!(out.assignments.iter().all(|a| a.fallback));
        assert_cap_held(&w, &out);
    }

    #[test]
    fn fairness_tracks_serviced_spokes() {
        let mut cfg = three_spokes(AircraftSpec::c130(2), Stock::new(0, 2, 2, 2));
        cfg.dispatch.two_leg_routes = false;
        let mut w = world(cfg);
        let out = w.dispatch(0);
        w.engine.end_period();

        let served: Vec<SpokeId> = out.assignments.iter().map(|a| a.stops[0].spoke).collect();
        for &s in &served {
            assert_eq!(w.engine.fairness().recent(s), 1.0);
        }
        w.engine.end_period();
        for &s in &served {
            assert!(w.engine.fairness().recent(s) < 1.0);
        }
    }

    #[test]
    fn hub_without_needed_resource_leaves_aircraft_idle() {
        let mut cfg = three_spokes(AircraftSpec::c130(2), Stock::new(0, 2, 2, 2));
        cfg.hub_supply = Some(Stock::new(0, 10, 10, 10));
        let mut w = world(cfg);
        let out = w.dispatch(0);
        assert!(out.assignments.is_empty());
        assert_eq!(out.fallbacks, 0);
        assert!(out.incidents.is_empty());
        assert_eq!(w.fleet.count_in(AircraftState::IdleAtHub), 2);
    }

    #[test]
    fn empty_hub_leaves_aircraft_idle() {
        let mut cfg = three_spokes(AircraftSpec::c130(1), Stock::ZERO);
        cfg.hub_supply = Some(Stock::ZERO);
        let mut w = world(cfg);
        for p in 0..4 {
            let out = w.step(p);
            assert!(out.assignments.is_empty());
            assert_eq!(out.fallbacks, 0);
            assert!(out.incidents.is_empty());
        }
    }

    #[test]
    fn non_finite_scores_fall_back_and_log() {
        let mut cfg = three_spokes(AircraftSpec::c130(2), Stock::new(0, 2, 2, 2));
        cfg.dispatch.w_dist = f64::INFINITY;
        let mut w = world(cfg);
        let out = w.dispatch(0);
        assert_eq!(out.fallbacks, 2);
        assert_eq!(out.incidents.len(), 2);
        assert!(out.incidents.iter().all(|i| matches!(i, Incident::SchedulingInconsistency { .. })));
        assert!(!out.assignments.is_empty());
        assert!(out.assignments.iter().all(|a| a.fallback));
    }

    #[test]
    fn pair_rotation_mode_walks_pairs() {
        let mut cfg = AirliftConfig {
            layout: LayoutSpec::Ring { spoke_count: 4, radius: 100.0 },
            fleet: vec![AircraftSpec::c130(2)],
            initial_stock: Stock::ZERO,
            ..AirliftConfig::default()
        };
        cfg.dispatch.mode = DispatchMode::PairRotation;
        let mut w = world(cfg);
        let out = w.dispatch(0);
        assert_eq!(out.assignments.len(), 2);
        let first = &out.assignments[0].stops;
        assert_eq!(first[0].spoke, SpokeId(0));
        assert_eq!(first[1].spoke, SpokeId(1));
        assert_eq!(first[0].cargo, Stock::new(2, 1, 0, 0));
        assert_eq!(out.assignments[1].stops[0].spoke, SpokeId(2));
        assert_eq!(w.engine.rotation().cursor(), 0);
    }

    #[test]
    fn same_seed_same_decisions() {
        let cfg = AirliftConfig { initial_stock: Stock::new(1, 1, 0, 0), ..AirliftConfig::default() };
        let mut a = world(cfg.clone());
        let mut b = world(cfg);
        for p in 0..12 {
            let oa = a.step(p);
            let ob = b.step(p);
            assert_eq!(oa.assignments, ob.assignments, "diverged at period {p}");
        }
    }

    #[test]
    fn bad_pair_order_rejected() {
        let mut cfg = AirliftConfig::default();
        cfg.dispatch.pair_order = Some(vec![(0, 10)]);
        assert!(matches!(DispatchEngine::new(&cfg), Err(DispatchError::PairOutOfRange { index: 0, .. })));
    }
}
