//! End-of-run results.

use al_core::{Incident, Stock};

/// Incidents seen during a run, by kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentCounts {
    pub scheduling_inconsistencies:    u32,
    pub resource_invariant_violations: u32,
    pub route_aborts:                  u32,
    pub arrivals_dropped:              u32,
    pub shortages:                     u32,
}

impl IncidentCounts {
    pub fn record(&mut self, incident: &Incident) {
        let slot = match incident {
            Incident::SchedulingInconsistency { .. } => &mut self.scheduling_inconsistencies,
            Incident::ResourceInvariantViolation { .. } => &mut self.resource_invariant_violations,
            Incident::AircraftRouteAbort { .. } => &mut self.route_aborts,
            Incident::ArrivalDropped { .. } => &mut self.arrivals_dropped,
            Incident::Shortage { .. } => &mut self.shortages,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        self.scheduling_inconsistencies
            + self.resource_invariant_violations
            + self.route_aborts
            + self.arrivals_dropped
            + self.shortages
    }
}

/// Totals since the last build or reset, returned by `run_headless` and
/// `run`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub periods_run:  u64,
    pub total_ops:    u64,
    pub ops_by_spoke: Vec<u64>,
    pub final_stock:  Vec<Stock>,
    /// Missed PM upkeeps across all spokes.
    pub shortages:    u64,
    pub incidents:    IncidentCounts,
    pub assignments:  usize,
    pub fallbacks:    u32,
}

impl RunSummary {
    /// Spokes with every resource positive at the end of the run.
    pub fn operational_spokes(&self) -> usize {
        self.final_stock.iter().filter(|s| s.all_positive()).count()
    }
}
