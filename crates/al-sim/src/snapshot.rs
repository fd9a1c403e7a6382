//! Owned, read-only views of the simulation published between periods.
//!
//! A [`Snapshot`] copies everything a renderer, recorder, or report needs,
//! so consumers on other threads never borrow live simulation state.

use al_core::{AircraftId, NodeRef, Period, Phase, Point, SpokeId, Stock};
use al_dispatch::{DispatchEngine, Stage};
use al_fleet::{Aircraft, AircraftState, Assignment, Fleet};
use al_ledger::{PeriodReport, ResourceLedger};

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// State of the whole network at the end of one period.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub period:      Period,
    pub phase:       Phase,
    pub day:         u64,
    /// Stage detected by this period's dispatch pass.
    pub stage:       Stage,
    pub spokes:      Vec<SpokeView>,
    pub aircraft:    Vec<AircraftView>,
    /// Operations run across all spokes since the start of the run.
    pub total_ops:   u64,
    /// Routes handed out during this period.
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    pub(crate) fn capture(
        period:      Period,
        ledger:      &ResourceLedger,
        fleet:       &Fleet,
        engine:      &DispatchEngine,
        assignments: Vec<Assignment>,
    ) -> Self {
        let fairness = engine.fairness();
        let reservations = engine.reservations();
        let spokes = ledger
            .spokes()
            .iter()
            .map(|s| SpokeView {
                id:           s.id,
                position:     s.position,
                stock:        s.stock,
                operational:  s.operational,
                active:       s.active,
                ops_total:    s.ops_total,
                shortages:    s.shortages,
                fairness:     fairness.recent(s.id),
                reservations: reservations.count(s.id),
            })
            .collect();
        Self {
            period,
            phase: period.phase(),
            day: period.day(),
            stage: engine.stage(),
            spokes,
            aircraft: fleet.aircraft().iter().map(AircraftView::from).collect(),
            total_ops: ledger.total_ops(),
            assignments,
        }
    }

    pub fn spoke(&self, id: SpokeId) -> Option<&SpokeView> {
        self.spokes.get(id.index())
    }

    /// Number of aircraft in `state`.
    pub fn count_in(&self, state: AircraftState) -> usize {
        self.aircraft.iter().filter(|a| a.state == state).count()
    }
}

/// One spoke as seen at the end of a period.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpokeView {
    pub id:           SpokeId,
    pub position:     Point,
    pub stock:        Stock,
    pub operational:  bool,
    pub active:       bool,
    pub ops_total:    u64,
    pub shortages:    u32,
    /// Recent-service counter after this period's decay.
    pub fairness:     f64,
    /// Aircraft reserved on this spoke during the period.
    pub reservations: u32,
}

/// One aircraft as seen at the end of a period.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftView {
    pub id:          AircraftId,
    pub name:        String,
    pub type_tag:    String,
    pub state:       AircraftState,
    pub position:    Point,
    pub heading:     f64,
    pub location:    NodeRef,
    /// Endpoints of the current leg, if flying or about to.
    pub leg:         Option<(NodeRef, NodeRef)>,
    /// Fraction of the current leg flown.
    pub progress:    f64,
    pub cargo:       Stock,
    pub legs_flown:  u32,
    pub sorties:     u32,
}

impl From<&Aircraft> for AircraftView {
    fn from(ac: &Aircraft) -> Self {
        Self {
            id:         ac.id,
            name:       ac.name.clone(),
            type_tag:   ac.type_tag.clone(),
            state:      ac.state,
            position:   ac.position,
            heading:    ac.heading,
            location:   ac.location,
            leg:        ac.leg.as_ref().map(|l| (l.origin, l.destination)),
            progress:   ac.leg.as_ref().map_or(0.0, |l| l.progress()),
            cargo:      ac.cargo,
            legs_flown: ac.legs_flown,
            sorties:    ac.sorties_total,
        }
    }
}

// ── PeriodSummary ─────────────────────────────────────────────────────────────

/// Counters for one period, passed to `SimObserver::on_period_end`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodSummary {
    pub period:         Period,
    pub stage:          Option<Stage>,
    pub deliveries:     usize,
    pub upkeep_paid:    u32,
    pub shortages:      u32,
    pub ops_run:        u32,
    pub assignments:    usize,
    pub fallbacks:      u32,
    pub incidents:      usize,
    pub operational:    usize,
    pub cumulative_ops: u64,
}

impl PeriodSummary {
    pub(crate) fn new(period: Period, report: &PeriodReport) -> Self {
        Self {
            period,
            deliveries:  report.deliveries,
            upkeep_paid: report.upkeep_paid,
            shortages:   report.shortages,
            ops_run:     report.ops_run,
            ..Default::default()
        }
    }
}
