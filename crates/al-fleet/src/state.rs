//! Aircraft lifecycle states, legs, and assignments.

use std::fmt;

use al_core::{AircraftId, NodeRef, SpokeId, Stock};

// ── AircraftState ─────────────────────────────────────────────────────────────

/// Lifecycle state of one aircraft.
///
/// ```text
/// IdleAtHub ─assign→ Loading ─load→ Departing ─heading→ Enroute
///     ↑                                                    │ remaining < threshold
///     │                                                 Arriving
///     │                                                    │ spoke
///     ├──────── hub ←── Departing ←── Unloading ←──────────┘
///     └── Resting (after `sorties_before_rest` sorties)
/// ```
///
/// `BrokenAtHub` / `BrokenAtSpoke` are entered only through maintenance
/// commands and left only through repair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AircraftState {
    IdleAtHub,
    Loading,
    Departing,
    Enroute,
    Arriving,
    Unloading,
    Resting,
    BrokenAtHub,
    BrokenAtSpoke,
}

impl AircraftState {
    pub fn as_str(self) -> &'static str {
        match self {
            AircraftState::IdleAtHub => "IDLE_AT_HUB",
            AircraftState::Loading => "LOADING",
            AircraftState::Departing => "DEPARTING",
            AircraftState::Enroute => "ENROUTE",
            AircraftState::Arriving => "ARRIVING",
            AircraftState::Unloading => "UNLOADING",
            AircraftState::Resting => "RESTING",
            AircraftState::BrokenAtHub => "BROKEN_AT_HUB",
            AircraftState::BrokenAtSpoke => "BROKEN_AT_SPOKE",
        }
    }

    /// Only idle aircraft enter the dispatch candidate pool.
    #[inline]
    pub fn is_available(self) -> bool {
        self == AircraftState::IdleAtHub
    }

    #[inline]
    pub fn is_broken(self) -> bool {
        matches!(self, AircraftState::BrokenAtHub | AircraftState::BrokenAtSpoke)
    }

    /// Moving between nodes.
    #[inline]
    pub fn in_flight(self) -> bool {
        matches!(
            self,
            AircraftState::Departing | AircraftState::Enroute | AircraftState::Arriving
        )
    }
}

impl fmt::Display for AircraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One movement segment between two nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub origin:         NodeRef,
    pub destination:    NodeRef,
    /// Cargo on board for this leg.
    pub cargo:          Stock,
    /// Flight hours from origin to destination.
    pub duration_hours: f64,
    pub elapsed_hours:  f64,
}

impl Leg {
    /// Fraction flown, in `[0, 1]`.  Zero-length legs report `1.0`.
    #[inline]
    pub fn progress(&self) -> f64 {
        if self.duration_hours <= 0.0 {
            return 1.0;
        }
        (self.elapsed_hours / self.duration_hours).min(1.0)
    }

    #[inline]
    pub fn remaining_hours(&self) -> f64 {
        (self.duration_hours - self.elapsed_hours).max(0.0)
    }
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// One spoke visit and the cargo to drop there.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub spoke: SpokeId,
    pub cargo: Stock,
}

/// A route handed to an idle aircraft: `hub → stops… → hub`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub aircraft: AircraftId,
    /// One or two stops, visited in order.
    pub stops: Vec<Stop>,
    /// Produced by the pair-rotation fallback rather than smart targeting.
    pub fallback: bool,
}

impl Assignment {
    /// Total units loaded at the hub.
    pub fn total_cargo(&self) -> Stock {
        let mut sum = Stock::ZERO;
        for stop in &self.stops {
            sum += stop.cargo;
        }
        sum
    }
}

// ── FleetEvent ────────────────────────────────────────────────────────────────

/// Notable lifecycle transitions, returned by `Fleet` operations.
#[derive(Clone, Debug, PartialEq)]
pub enum FleetEvent {
    Loaded { aircraft: AircraftId, cargo: Stock },
    Departed { aircraft: AircraftId, from: NodeRef, to: NodeRef },
    Delivered { aircraft: AircraftId, spoke: SpokeId, cargo: Stock },
    SortieComplete { aircraft: AircraftId },
    RestStarted { aircraft: AircraftId },
    RestEnded { aircraft: AircraftId },
    Broken { aircraft: AircraftId, at: NodeRef },
    Repaired { aircraft: AircraftId },
}
