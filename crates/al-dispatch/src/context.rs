//! Read-only inputs and per-pass scratch state shared by targeting policies.

use al_core::{DispatchConfig, Period, ResourceTargets, SpokeId, Stock};
use al_fleet::Fleet;
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::{FairnessState, ReservationTable, Stage};

/// Everything a policy may read while choosing a route.
///
/// Rebuilt by the engine for every idle aircraft so that fairness updates
/// from earlier aircraft in the same pass are visible to later ones.
pub struct DispatchContext<'a> {
    pub period:    Period,
    pub config:    &'a DispatchConfig,
    pub targets:   ResourceTargets,
    pub ledger:    &'a ResourceLedger,
    pub fleet:     &'a Fleet,
    pub distances: &'a DistanceModel,
    pub fairness:  &'a FairnessState,
}

impl DispatchContext<'_> {
    /// Finite hub supply left, `None` = unlimited.
    #[inline]
    pub fn hub_available(&self) -> Option<Stock> {
        self.ledger.hub_available()
    }
}

/// Scratch state for one dispatch pass (one period).
#[derive(Clone, Debug)]
pub struct PassState {
    pub stage: Stage,
    /// Stock + pending arrivals + cargo already bound for each spoke,
    /// updated as the pass commits routes.
    pub projected: Vec<Stock>,
    pub reservations: ReservationTable,
}

impl PassState {
    /// Start a pass: detect the stage and project inbound cargo.
    pub fn begin(ledger: &ResourceLedger, fleet: &Fleet, mut reservations: ReservationTable) -> Self {
        reservations.reset();
        let mut projected: Vec<Stock> = ledger
            .spokes()
            .iter()
            .map(|s| s.stock + ledger.arrivals().pending_for(s.id))
            .collect();
        for ac in fleet.aircraft() {
            for stop in &ac.route {
                if let Some(p) = projected.get_mut(stop.spoke.index()) {
                    *p += stop.cargo;
                }
            }
        }
        Self { stage: Stage::detect(ledger), projected, reservations }
    }

    #[inline]
    pub fn projected(&self, spoke: SpokeId) -> Stock {
        self.projected.get(spoke.index()).copied().unwrap_or_default()
    }

    /// Record a committed stop.
    pub fn commit(&mut self, spoke: SpokeId, cargo: Stock) {
        self.reservations.reserve(spoke);
        if let Some(p) = self.projected.get_mut(spoke.index()) {
            *p += cargo;
        }
    }
}

