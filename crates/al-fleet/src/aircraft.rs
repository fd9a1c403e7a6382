//! A single airframe.

use std::collections::VecDeque;

use al_core::{AircraftId, AircraftSpec, NodeRef, Period, Point, Stock};
use al_spatial::DistanceModel;

use crate::{AircraftState, Leg, Stop};

/// Slack for floating-point hour budgets.
pub(crate) const EPS: f64 = 1e-9;

/// One aircraft: static type data plus mutable lifecycle state.
///
/// Owned by [`Fleet`](crate::Fleet); everything else reads it through
/// shared references or snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Aircraft {
    pub id:                  AircraftId,
    /// Display name, e.g. `"C-130 #2"`.
    pub name:                String,
    pub type_tag:            String,
    /// Total resource units per sortie.
    pub capacity:            u32,
    /// Layout units per flight hour.
    pub cruise_speed:        f64,
    pub sorties_before_rest: u32,
    pub rest_periods:        u32,

    // ── Lifecycle ─────────────────────────────────────────────────────────
    pub state:    AircraftState,
    /// Node the aircraft is at, or last departed from while flying.
    pub location: NodeRef,
    pub position: Point,
    /// Radians, `atan2` convention.
    pub heading:  f64,
    pub leg:      Option<Leg>,
    /// Stops still to be visited, front first.
    pub route:    VecDeque<Stop>,
    /// Units on board.
    pub cargo:    Stock,
    /// Hours already spent in the current timed state (loading, departure,
    /// unloading).
    pub phase_elapsed: f64,
    /// First period in which a resting aircraft is available again.
    pub rest_until: Option<Period>,
    /// Break on arrival at the end of the current leg.
    pub maintenance_due: bool,
    /// Carrying out a dispatched route (as opposed to a ferry leg).
    pub on_sortie: bool,

    // ── Counters ──────────────────────────────────────────────────────────
    pub legs_flown:         u32,
    pub sorties_total:      u32,
    pub sorties_since_rest: u32,
}

impl Aircraft {
    pub fn new(id: AircraftId, name: String, spec: &AircraftSpec, hub: Point) -> Self {
        Self {
            id,
            name,
            type_tag:            spec.type_tag.clone(),
            capacity:            spec.capacity,
            cruise_speed:        spec.cruise_speed,
            sorties_before_rest: spec.sorties_before_rest,
            rest_periods:        spec.rest_periods,
            state:               AircraftState::IdleAtHub,
            location:            NodeRef::Hub,
            position:            hub,
            heading:             0.0,
            leg:                 None,
            route:               VecDeque::new(),
            cargo:               Stock::ZERO,
            phase_elapsed:       0.0,
            rest_until:          None,
            maintenance_due:     false,
            on_sortie:           false,
            legs_flown:          0,
            sorties_total:       0,
            sorties_since_rest:  0,
        }
    }

    /// Where the current leg (if any) is headed.
    #[inline]
    pub fn destination(&self) -> Option<NodeRef> {
        self.leg.as_ref().map(|l| l.destination)
    }

    /// Spend up to `need - phase_elapsed` hours of `budget` on a timed state.
    /// Returns `true` when the state's duration has been fully served.
    pub(crate) fn spend(&mut self, budget: &mut f64, need: f64) -> bool {
        let remaining = (need - self.phase_elapsed).max(0.0);
        if *budget + EPS >= remaining {
            *budget = (*budget - remaining).max(0.0);
            self.phase_elapsed = 0.0;
            true
        } else {
            self.phase_elapsed += *budget;
            *budget = 0.0;
            false
        }
    }

    /// Open a leg from the current location to `to`, pointing the heading.
    pub(crate) fn begin_leg(&mut self, to: NodeRef, distances: &DistanceModel) {
        let from = self.location;
        let from_pos = distances.position(from);
        let to_pos = distances.position(to);
        let duration_hours = distances.distance(from, to) / self.cruise_speed;
        self.heading = from_pos.heading_to(to_pos);
        self.position = from_pos;
        self.leg = Some(Leg {
            origin: from,
            destination: to,
            cargo: self.cargo,
            duration_hours,
            elapsed_hours: 0.0,
        });
    }

    /// Fly `hours` along the current leg and interpolate the position.
    pub(crate) fn advance_leg(&mut self, hours: f64, distances: &DistanceModel) {
        if let Some(leg) = self.leg.as_mut() {
            leg.elapsed_hours = (leg.elapsed_hours + hours).min(leg.duration_hours);
            let from = distances.position(leg.origin);
            let to = distances.position(leg.destination);
            self.position = from.lerp(to, leg.progress());
        }
    }

    /// Distance left on the current leg, in layout units.
    pub(crate) fn remaining_distance(&self) -> f64 {
        self.leg.as_ref().map_or(0.0, |l| l.remaining_hours() * self.cruise_speed)
    }

    /// Put the aircraft on the ground at the hub with nothing pending.
    pub(crate) fn reset_to_hub(&mut self, hub: Point, state: AircraftState) {
        self.state = state;
        self.location = NodeRef::Hub;
        self.position = hub;
        self.leg = None;
        self.route.clear();
        self.cargo = Stock::ZERO;
        self.phase_elapsed = 0.0;
        self.on_sortie = false;
    }
}
