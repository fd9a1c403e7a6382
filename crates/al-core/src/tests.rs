//! Unit tests for al-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AircraftId, NodeRef, SpokeId};

    #[test]
    fn index_roundtrip() {
        let id = SpokeId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(SpokeId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(SpokeId::INVALID.0, u32::MAX);
        assert_eq!(AircraftId::INVALID.0, u32::MAX);
    }

    #[test]
    fn node_indices_put_hub_first() {
        assert_eq!(NodeRef::Hub.node_index(), 0);
        assert_eq!(NodeRef::Spoke(SpokeId(0)).node_index(), 1);
        assert_eq!(NodeRef::Spoke(SpokeId(9)).node_index(), 10);
        assert!(NodeRef::Hub < NodeRef::Spoke(SpokeId(0)));
    }

    #[test]
    fn node_display_is_one_based() {
        assert_eq!(NodeRef::Hub.to_string(), "HUB");
        assert_eq!(NodeRef::Spoke(SpokeId(0)).to_string(), "S1");
        assert_eq!(AircraftId(3).to_string(), "AircraftId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;
    use crate::geo::ring_positions;

    #[test]
    fn euclidean_distance() {
        assert!((Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn heading_of_coincident_points_is_zero() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(p.heading_to(p), 0.0);
        let north = Point::ORIGIN.heading_to(Point::new(0.0, 10.0));
        assert!((north - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn lerp_clamps() {
        let a = Point::ORIGIN;
        let b = Point::new(10.0, 0.0);
        assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 0.0));
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn ring_is_equidistant_from_center() {
        let ring = ring_positions(Point::ORIGIN, 100.0, 10);
        assert_eq!(ring.len(), 10);
        for p in &ring {
            assert!((p.distance(Point::ORIGIN) - 100.0).abs() < 1e-9);
        }
        assert!((ring[0].x - 100.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod time {
    use crate::{Period, Phase, SimClock};

    #[test]
    fn even_periods_are_am() {
        assert_eq!(Period(0).phase(), Phase::Am);
        assert_eq!(Period(1).phase(), Phase::Pm);
        assert!(Period(5).is_pm());
        assert_eq!(Period(5).day(), 2);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Period(3) + 2, Period(5));
        assert_eq!(Period(7) - Period(3), 4);
        assert_eq!(Period(3).next(), Period(4));
    }

    #[test]
    fn clock_advance() {
        let mut clock = SimClock::new();
        assert_eq!(clock.periods_elapsed(), 0);
        clock.advance();
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_period, Period(3));
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.phase(), Phase::Pm);
        assert_eq!(clock.to_string(), "P3 (day 1 PM)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, run_seed};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn jitter_is_bounded() {
        let mut rng = SimRng::new(1);
        for _ in 0..1000 {
            let j = rng.jitter(0.01);
            assert!((-0.01..=0.01).contains(&j), "got {j}");
        }
    }

    #[test]
    fn zero_jitter_still_consumes_a_draw() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        assert_eq!(a.jitter(0.0), 0.0);
        b.jitter(0.3);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn run_zero_keeps_base_seed() {
        assert_eq!(run_seed(42, 0), 42);
        assert_ne!(run_seed(42, 1), run_seed(42, 2));
    }
}

#[cfg(test)]
mod resource {
    use crate::{Resource, Stock};

    #[test]
    fn indexing_by_resource() {
        let mut s = Stock::new(1, 2, 3, 4);
        assert_eq!(s[Resource::C], 3);
        s[Resource::A] += 5;
        assert_eq!(s.get(Resource::A), 6);
        assert_eq!(s.total(), 15);
    }

    #[test]
    fn operation_gate_needs_all_four() {
        assert!(Stock::splat(1).all_positive());
        assert!(!Stock::new(1, 1, 0, 1).all_positive());
        assert!(Stock::ZERO.is_empty());
    }

    #[test]
    fn saturating_sub_reports_shortfall() {
        let (left, short) = Stock::new(2, 0, 5, 1).saturating_sub(Stock::new(1, 2, 5, 3));
        assert_eq!(left, Stock::new(1, 0, 0, 0));
        assert_eq!(short, 4);
    }

    #[test]
    fn display() {
        assert_eq!(Stock::new(4, 4, 2, 2).to_string(), "A4 B4 C2 D2");
    }
}

#[cfg(test)]
mod config {
    use crate::{AircraftSpec, AirliftConfig, AlError, LayoutSpec, Point, SpokeId, Stock};

    #[test]
    fn defaults_validate() {
        let cfg = AirliftConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.periods, 60);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.spoke_count(), 10);
        assert_eq!(cfg.fleet_size(), 2);
        assert_eq!(cfg.initial_stock, Stock::new(4, 4, 2, 2));
    }

    #[test]
    fn targets_round_up_days_of_supply() {
        let cfg = AirliftConfig::default();
        // A/B: 2 days × 1/day; C/D: 1 day × 2/day.
        assert_eq!(cfg.resource_targets().0, Stock::splat(2));

        let cfg = AirliftConfig {
            upkeep_interval_days: 3,
            target_days_of_supply: [2.0, 0.5, 1.5, 0.1],
            ..AirliftConfig::default()
        };
        assert_eq!(cfg.resource_targets().0, Stock::new(1, 1, 3, 1));
    }

    #[test]
    fn default_pair_order_is_consecutive() {
        let cfg = AirliftConfig::default();
        let pairs = cfg.pair_order();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], (SpokeId(0), SpokeId(1)));
        assert_eq!(pairs[4], (SpokeId(8), SpokeId(9)));

        let odd = AirliftConfig {
            layout: LayoutSpec::Ring { spoke_count: 3, radius: 100.0 },
            ..AirliftConfig::default()
        };
        assert_eq!(odd.pair_order(), vec![(SpokeId(0), SpokeId(1)), (SpokeId(2), SpokeId(0))]);
    }

    #[test]
    fn rejects_zero_capacity_and_bad_decay() {
        let mut cfg = AirliftConfig::default();
        cfg.fleet = vec![AircraftSpec { capacity: 0, ..AircraftSpec::c130(1) }];
        cfg.dispatch.fairness_decay = 1.5;
        match cfg.validate() {
            Err(AlError::Config(msg)) => {
                assert!(msg.contains("zero capacity"), "{msg}");
                assert!(msg.contains("fairness_decay"), "{msg}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_degenerate_layout() {
        let cfg = AirliftConfig {
            layout: LayoutSpec::Explicit {
                hub:    Point::ORIGIN,
                spokes: vec![Point::ORIGIN, Point::ORIGIN],
            },
            ..AirliftConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(AlError::Config(_))));
    }

    #[test]
    fn rejects_pair_referencing_unknown_spoke() {
        let mut cfg = AirliftConfig::default();
        cfg.dispatch.pair_order = Some(vec![(0, 1), (2, 42)]);
        assert!(matches!(cfg.validate(), Err(AlError::Config(m)) if m.contains("unknown spoke")));
    }

    #[test]
    fn rejects_empty_fleet() {
        let cfg = AirliftConfig { fleet: vec![], ..AirliftConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod incident {
    use crate::{Incident, Period, SpokeId, Stock};

    #[test]
    fn kind_and_period() {
        let i = Incident::ArrivalDropped {
            period: Period(4),
            spoke:  SpokeId(2),
            cargo:  Stock::new(1, 0, 0, 0),
        };
        assert_eq!(i.kind(), "arrival_dropped");
        assert_eq!(i.period(), Period(4));
        assert!(i.to_string().contains("dropped"));
    }
}
