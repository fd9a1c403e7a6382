//! Typed simulation configuration.
//!
//! `AirliftConfig` is consumed once, at `SimBuilder::build`, where it is
//! validated before any tick runs.  Every field has a default matching the
//! reference scenario (ten spokes on a ring, two C-130s, 60 periods), so a
//! partially specified configuration (e.g. JSON with the `serde` feature)
//! resolves to a complete one.

use crate::geo::{Point, ring_positions};
use crate::{AlError, AlResult, Resource, SpokeId, Stock};

// ── Layout ───────────────────────────────────────────────────────────────────

/// Spatial layout of the hub and spokes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum LayoutSpec {
    /// Hub at the origin, spokes evenly spaced on a circle.
    Ring { spoke_count: u32, radius: f64 },
    /// Hand-placed hub and spokes.
    Explicit { hub: Point, spokes: Vec<Point> },
}

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec::Ring { spoke_count: 10, radius: 400.0 }
    }
}

impl LayoutSpec {
    pub fn spoke_count(&self) -> usize {
        match self {
            LayoutSpec::Ring { spoke_count, .. } => *spoke_count as usize,
            LayoutSpec::Explicit { spokes, .. } => spokes.len(),
        }
    }

    /// Resolve to `(hub, spokes)` coordinates.
    pub fn positions(&self) -> (Point, Vec<Point>) {
        match self {
            LayoutSpec::Ring { spoke_count, radius } => {
                (Point::ORIGIN, ring_positions(Point::ORIGIN, *radius, *spoke_count as usize))
            }
            LayoutSpec::Explicit { hub, spokes } => (*hub, spokes.clone()),
        }
    }
}

// ── Fleet ────────────────────────────────────────────────────────────────────

/// One aircraft type and how many of it the fleet contains.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftSpec {
    /// Fleet/type tag shown in snapshots and used to name airframes.
    pub type_tag: String,
    pub count: u32,
    /// Total resource units carried per sortie.
    pub capacity: u32,
    /// Layout units per flight hour.
    pub cruise_speed: f64,
    /// Completed sorties before a mandatory rest at the hub.
    pub sorties_before_rest: u32,
    /// Periods spent resting.
    pub rest_periods: u32,
}

impl AircraftSpec {
    pub fn c130(count: u32) -> Self {
        Self {
            type_tag: "C-130".into(),
            count,
            capacity: 6,
            cruise_speed: 90.0,
            sorties_before_rest: 6,
            rest_periods: 1,
        }
    }

    pub fn c27(count: u32) -> Self {
        Self {
            type_tag: "C-27".into(),
            count,
            capacity: 3,
            cruise_speed: 80.0,
            sorties_before_rest: 12,
            rest_periods: 1,
        }
    }
}

// ── Timing ───────────────────────────────────────────────────────────────────

/// Flight-hour durations of the aircraft lifecycle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlightTiming {
    /// Simulated hours per period (one half-day).
    pub period_hours: f64,
    pub load_hours: f64,
    /// Time to taxi out and establish the heading.
    pub departure_hours: f64,
    pub unload_hours: f64,
    /// Remaining distance (layout units) below which an en-route aircraft
    /// switches to its arrival approach.
    pub arrival_threshold: f64,
}

impl Default for FlightTiming {
    fn default() -> Self {
        Self {
            period_hours:      12.0,
            load_hours:        1.0,
            departure_hours:   0.25,
            unload_hours:      1.0,
            arrival_threshold: 20.0,
        }
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Which targeting policy drives dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DispatchMode {
    /// Score-based targeting with pair rotation as a logged fallback.
    #[default]
    Smart,
    /// Fixed pair-order rotation only.
    PairRotation,
}

/// Weights and coefficients of the dispatch scoring function.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    pub mode: DispatchMode,
    pub w_ops: f64,
    pub w_need: f64,
    pub w_dist: f64,
    pub w_cong: f64,
    /// Penalty per aircraft already reserved on a spoke this period.
    pub congestion_coefficient: f64,
    /// Per-period retention factor of the recent-service counters, `[0, 1)`.
    pub fairness_decay: f64,
    /// Hard cap on aircraft reserved per spoke per period.  `None` = soft
    /// congestion penalty only.
    pub max_aircraft_per_spoke_per_period: Option<u32>,
    pub two_leg_routes: bool,
    /// Discount applied to the benefit terms when scoring a second leg.
    pub second_leg_multiplier: f64,
    /// A second leg is only flown when its score exceeds this threshold.
    pub second_leg_min_score: f64,
    /// Magnitude of the additive tie-breaking jitter.
    pub jitter: f64,
    /// Relative weight of each resource in `need_score`.
    pub need_weights: [f64; 4],
    /// Fixed distance normalizer in layout units.  `None` = the 90th
    /// percentile of all pairwise distances.
    pub distance_normalizer: Option<f64>,
    /// Spoke pairs visited by pair rotation.  `None` = consecutive pairs.
    pub pair_order: Option<Vec<(u32, u32)>>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode:                              DispatchMode::Smart,
            w_ops:                             1.0,
            w_need:                            0.6,
            w_dist:                            0.8,
            w_cong:                            0.7,
            congestion_coefficient:            0.5,
            fairness_decay:                    0.8,
            max_aircraft_per_spoke_per_period: None,
            two_leg_routes:                    true,
            second_leg_multiplier:             0.7,
            second_leg_min_score:              0.1,
            jitter:                            0.01,
            need_weights:                      [1.0; 4],
            distance_normalizer:               None,
            pair_order:                        None,
        }
    }
}

// ── AirliftConfig ────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AirliftConfig {
    /// Periods simulated by `Sim::run`.  60 = 30 days.
    pub periods: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub layout: LayoutSpec,
    pub fleet: Vec<AircraftSpec>,

    /// Stock every spoke starts with.
    pub initial_stock: Stock,

    /// Finite hub supply.  `None` = unlimited.
    pub hub_supply: Option<Stock>,

    /// Target days of supply for A, B, C, D.
    pub target_days_of_supply: [f64; 4],

    /// PM upkeep draws A and B once every this many days.
    pub upkeep_interval_days: u32,

    pub timing: FlightTiming,
    pub dispatch: DispatchConfig,

    /// Publish a snapshot to the observer every N periods.
    pub output_interval_periods: u64,
}

impl Default for AirliftConfig {
    fn default() -> Self {
        Self {
            periods:                 60,
            seed:                    42,
            layout:                  LayoutSpec::default(),
            fleet:                   vec![AircraftSpec::c130(2)],
            initial_stock:           Stock::new(4, 4, 2, 2),
            hub_supply:              None,
            target_days_of_supply:   [2.0, 2.0, 1.0, 1.0],
            upkeep_interval_days:    1,
            timing:                  FlightTiming::default(),
            dispatch:                DispatchConfig::default(),
            output_interval_periods: 1,
        }
    }
}

/// Per-resource target stock in units, resolved from days of supply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResourceTargets(pub Stock);

impl ResourceTargets {
    #[inline]
    pub fn get(&self, r: Resource) -> u32 {
        self.0.get(r)
    }
}

impl AirliftConfig {
    /// Number of spokes in the layout.
    pub fn spoke_count(&self) -> usize {
        self.layout.spoke_count()
    }

    /// Total number of airframes across all types.
    pub fn fleet_size(&self) -> usize {
        self.fleet.iter().map(|s| s.count as usize).sum()
    }

    /// Average units drawn per day, per resource.
    ///
    /// A and B are drawn once per upkeep interval; C and D once per
    /// operation, and a spoke can run one operation per period.
    pub fn daily_draw(&self) -> [f64; 4] {
        let upkeep = 1.0 / self.upkeep_interval_days.max(1) as f64;
        [upkeep, upkeep, 2.0, 2.0]
    }

    /// Resolve `target_days_of_supply` into unit targets (at least 1 each).
    pub fn resource_targets(&self) -> ResourceTargets {
        let draw = self.daily_draw();
        let mut out = Stock::ZERO;
        for r in Resource::ALL {
            let units = (self.target_days_of_supply[r.index()] * draw[r.index()]).ceil();
            out.set(r, (units as u32).max(1));
        }
        ResourceTargets(out)
    }

    /// The configured pair order, or consecutive spoke pairs
    /// `(0,1), (2,3), …` with an odd last spoke paired back to spoke 0.
    pub fn pair_order(&self) -> Vec<(SpokeId, SpokeId)> {
        if let Some(pairs) = &self.dispatch.pair_order {
            return pairs.iter().map(|&(i, j)| (SpokeId(i), SpokeId(j))).collect();
        }
        let n = self.spoke_count() as u32;
        (0..n)
            .step_by(2)
            .map(|i| {
                let j = if i + 1 < n { i + 1 } else { 0 };
                (SpokeId(i), SpokeId(j))
            })
            .collect()
    }

    /// Check every field once, before the first tick.
    ///
    /// All problems are collected and reported together in a single
    /// [`AlError::Config`].
    pub fn validate(&self) -> AlResult<()> {
        let mut issues: Vec<String> = Vec::new();

        // ── Layout ────────────────────────────────────────────────────────
        let spokes = self.spoke_count();
        if spokes == 0 {
            issues.push("layout has no spokes".into());
        }
        if let LayoutSpec::Ring { radius, .. } = self.layout {
            if !(radius.is_finite() && radius > 0.0) {
                issues.push(format!("ring radius must be positive, got {radius}"));
            }
        }
        let (hub, positions) = self.layout.positions();
        if !hub.is_finite() || positions.iter().any(|p| !p.is_finite()) {
            issues.push("layout contains non-finite coordinates".into());
        } else if spokes > 0 && positions.iter().all(|&p| p == hub) {
            issues.push("degenerate layout: every spoke coincides with the hub".into());
        }

        // ── Fleet ─────────────────────────────────────────────────────────
        if self.fleet_size() == 0 {
            issues.push("fleet is empty".into());
        }
        for spec in &self.fleet {
            if spec.capacity == 0 {
                issues.push(format!("aircraft type {} has zero capacity", spec.type_tag));
            }
            if !(spec.cruise_speed.is_finite() && spec.cruise_speed > 0.0) {
                issues.push(format!("aircraft type {} needs a positive cruise speed", spec.type_tag));
            }
            if spec.sorties_before_rest == 0 {
                issues.push(format!("aircraft type {} must fly at least one sortie before rest", spec.type_tag));
            }
        }

        // ── Resources ─────────────────────────────────────────────────────
        for r in Resource::ALL {
            let dos = self.target_days_of_supply[r.index()];
            if !(dos.is_finite() && dos > 0.0) {
                issues.push(format!("target days of supply for {r} must be positive, got {dos}"));
            }
        }
        if self.upkeep_interval_days == 0 {
            issues.push("upkeep interval must be at least one day".into());
        }

        // ── Timing ────────────────────────────────────────────────────────
        let t = &self.timing;
        if !(t.period_hours.is_finite() && t.period_hours > 0.0) {
            issues.push("period duration must be positive".into());
        }
        for (name, v) in [
            ("load", t.load_hours),
            ("departure", t.departure_hours),
            ("unload", t.unload_hours),
            ("arrival threshold", t.arrival_threshold),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                issues.push(format!("{name} timing must be non-negative, got {v}"));
            }
        }

        // ── Dispatch ──────────────────────────────────────────────────────
        let d = &self.dispatch;
        for (name, w) in [
            ("w_ops", d.w_ops),
            ("w_need", d.w_need),
            ("w_dist", d.w_dist),
            ("w_cong", d.w_cong),
            ("congestion_coefficient", d.congestion_coefficient),
        ] {
            if !(w.is_finite() && w >= 0.0) {
                issues.push(format!("{name} must be finite and non-negative, got {w}"));
            }
        }
        if d.need_weights.iter().any(|w| !(w.is_finite() && *w >= 0.0))
            || d.need_weights.iter().sum::<f64>() <= 0.0
        {
            issues.push("need weights must be non-negative with a positive sum".into());
        }
        if !(0.0..1.0).contains(&d.fairness_decay) {
            issues.push(format!("fairness_decay must be in [0, 1), got {}", d.fairness_decay));
        }
        if !(0.0..=1.0).contains(&d.second_leg_multiplier) {
            issues.push(format!(
                "second_leg_multiplier must be in [0, 1], got {}",
                d.second_leg_multiplier
            ));
        }
        if !d.second_leg_min_score.is_finite() {
            issues.push("second_leg_min_score must be finite".into());
        }
        if !(0.0..0.5).contains(&d.jitter) {
            issues.push(format!("jitter must be in [0, 0.5), got {}", d.jitter));
        }
        if let Some(norm) = d.distance_normalizer {
            if !(norm.is_finite() && norm > 0.0) {
                issues.push(format!("distance_normalizer must be positive, got {norm}"));
            }
        }
        if d.max_aircraft_per_spoke_per_period == Some(0) {
            issues.push("max_aircraft_per_spoke_per_period must be at least 1 when set".into());
        }
        if let Some(pairs) = &d.pair_order {
            if pairs.is_empty() {
                issues.push("pair order is empty".into());
            }
            for (k, &(i, j)) in pairs.iter().enumerate() {
                if i as usize >= spokes || j as usize >= spokes {
                    issues.push(format!("pair {k} ({i}, {j}) references an unknown spoke"));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(AlError::Config(issues.join("; ")))
        }
    }
}
