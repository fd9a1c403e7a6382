//! Plain data row types written by output backends.

use al_core::{Incident, Resource};
use al_sim::{AircraftView, PeriodSummary, Snapshot, SpokeView};

/// One aircraft at the end of a snapshot period.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftSnapshotRow {
    pub period:      u64,
    pub aircraft_id: u32,
    pub type_tag:    String,
    pub state:       &'static str,
    pub x:           f64,
    pub y:           f64,
    pub heading:     f64,
    /// Total units on board.
    pub cargo:       u32,
    pub legs_flown:  u32,
}

impl AircraftSnapshotRow {
    pub fn new(period: u64, view: &AircraftView) -> Self {
        Self {
            period,
            aircraft_id: view.id.0,
            type_tag:    view.type_tag.clone(),
            state:       view.state.as_str(),
            x:           view.position.x,
            y:           view.position.y,
            heading:     view.heading,
            cargo:       view.cargo.total(),
            legs_flown:  view.legs_flown,
        }
    }
}

/// One spoke at the end of a snapshot period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpokeSnapshotRow {
    pub period:      u64,
    pub spoke_id:    u32,
    pub a:           u32,
    pub b:           u32,
    pub c:           u32,
    pub d:           u32,
    pub operational: bool,
    pub ops_total:   u64,
}

impl SpokeSnapshotRow {
    pub fn new(period: u64, view: &SpokeView) -> Self {
        Self {
            period,
            spoke_id:    view.id.0,
            a:           view.stock[Resource::A],
            b:           view.stock[Resource::B],
            c:           view.stock[Resource::C],
            d:           view.stock[Resource::D],
            operational: view.operational,
            ops_total:   view.ops_total,
        }
    }
}

/// Both row sets for one snapshot.
pub fn snapshot_rows(snapshot: &Snapshot) -> (Vec<AircraftSnapshotRow>, Vec<SpokeSnapshotRow>) {
    let p = snapshot.period.0;
    (
        snapshot.aircraft.iter().map(|a| AircraftSnapshotRow::new(p, a)).collect(),
        snapshot.spokes.iter().map(|s| SpokeSnapshotRow::new(p, s)).collect(),
    )
}

/// Counters for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSummaryRow {
    pub period:             u64,
    pub day:                u64,
    pub phase:              &'static str,
    /// Empty when the pass had no stage (never in practice).
    pub stage:              &'static str,
    pub deliveries:         u64,
    pub upkeep_paid:        u32,
    pub shortages:          u32,
    pub ops_run:            u32,
    pub assignments:        u64,
    pub fallbacks:          u32,
    pub incidents:          u64,
    pub operational_spokes: u64,
    pub cumulative_ops:     u64,
}

impl From<&PeriodSummary> for PeriodSummaryRow {
    fn from(s: &PeriodSummary) -> Self {
        Self {
            period:             s.period.0,
            day:                s.period.day(),
            phase:              s.period.phase().as_str(),
            stage:              s.stage.map_or("", |st| st.as_str()),
            deliveries:         s.deliveries as u64,
            upkeep_paid:        s.upkeep_paid,
            shortages:          s.shortages,
            ops_run:            s.ops_run,
            assignments:        s.assignments as u64,
            fallbacks:          s.fallbacks,
            incidents:          s.incidents as u64,
            operational_spokes: s.operational as u64,
            cumulative_ops:     s.cumulative_ops,
        }
    }
}

/// One incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRow {
    pub period: u64,
    pub kind:   &'static str,
    pub detail: String,
}

impl From<&Incident> for IncidentRow {
    fn from(i: &Incident) -> Self {
        Self { period: i.period().0, kind: i.kind(), detail: i.to_string() }
    }
}
