//! `Fleet`: owner of every aircraft and driver of their state machines.
//!
//! # Time model
//!
//! Each call to [`Fleet::advance`] gives every aircraft one period's worth
//! of flight hours (`FlightTiming::period_hours`).  An aircraft spends that
//! budget state by state, so a short sortie can load, fly, unload, and land
//! back at the hub within a single period while a long one spans several.
//!
//! Aircraft are processed in ascending `AircraftId` order, so deliveries
//! enter the arrivals queue in a reproducible order.

use tracing::{debug, info, warn};

use al_core::{
    AircraftId, AirliftConfig, FlightTiming, Incident, NodeRef, Period, Point, SpokeId, Stock,
};
use al_ledger::ResourceLedger;
use al_spatial::DistanceModel;

use crate::aircraft::EPS;
use crate::{Aircraft, AircraftState, Assignment, FleetError, FleetEvent, FleetResult};

/// All aircraft, indexed by `AircraftId`.
#[derive(Clone, Debug)]
pub struct Fleet {
    aircraft: Vec<Aircraft>,
    hub: Point,
}

/// Shared inputs for one `advance` pass.
struct AdvanceCtx<'a> {
    now:       Period,
    timing:    &'a FlightTiming,
    distances: &'a DistanceModel,
    ledger:    &'a mut ResourceLedger,
    events:    &'a mut Vec<FleetEvent>,
}

impl Fleet {
    /// Expand every `AircraftSpec` into airframes named `"<type> #<n>"`,
    /// all idle at the hub.
    pub fn from_config(config: &AirliftConfig, hub: Point) -> Self {
        let mut aircraft = Vec::with_capacity(config.fleet_size());
        for spec in &config.fleet {
            for n in 1..=spec.count {
                let id = AircraftId(aircraft.len() as u32);
                aircraft.push(Aircraft::new(id, format!("{} #{n}", spec.type_tag), spec, hub));
            }
        }
        Self { aircraft, hub }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn aircraft(&self) -> &[Aircraft] {
        &self.aircraft
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn get(&self, id: AircraftId) -> FleetResult<&Aircraft> {
        self.aircraft.get(id.index()).ok_or(FleetError::AircraftNotFound(id))
    }

    fn get_mut(&mut self, id: AircraftId) -> FleetResult<&mut Aircraft> {
        self.aircraft.get_mut(id.index()).ok_or(FleetError::AircraftNotFound(id))
    }

    /// Idle aircraft in ascending id order.
    pub fn idle_aircraft(&self) -> Vec<AircraftId> {
        self.aircraft
            .iter()
            .filter(|a| a.state.is_available())
            .map(|a| a.id)
            .collect()
    }

    /// Number of aircraft in `state`.
    pub fn count_in(&self, state: AircraftState) -> usize {
        self.aircraft.iter().filter(|a| a.state == state).count()
    }

    // ── Period hooks ──────────────────────────────────────────────────────

    /// Release aircraft whose rest ends at or before `now`.
    pub fn begin_period(&mut self, now: Period) -> Vec<FleetEvent> {
        let mut events = Vec::new();
        for ac in &mut self.aircraft {
            if ac.state == AircraftState::Resting && ac.rest_until.is_some_and(|p| p <= now) {
                ac.state = AircraftState::IdleAtHub;
                ac.rest_until = None;
                events.push(FleetEvent::RestEnded { aircraft: ac.id });
            }
        }
        events
    }

    /// Abort every route that touches a spoke the ledger no longer serves.
    ///
    /// Undelivered cargo goes back to the hub and the aircraft is placed
    /// idle at the hub (or broken there, if maintenance was pending).
    pub fn abort_invalid_legs(&mut self, now: Period, ledger: &mut ResourceLedger) -> Vec<Incident> {
        let mut incidents = Vec::new();
        for ac in &mut self.aircraft {
            let leg_target = ac.destination().and_then(NodeRef::spoke);
            let bad = leg_target
                .into_iter()
                .chain(ac.route.iter().map(|s| s.spoke))
                .find(|&s| !ledger.is_active(s));
            let Some(spoke) = bad else { continue };

            let returned = ac.cargo;
            ledger.return_to_hub(returned);
            let state = if ac.maintenance_due {
                ac.maintenance_due = false;
                AircraftState::BrokenAtHub
            } else {
                AircraftState::IdleAtHub
            };
            ac.reset_to_hub(self.hub, state);
            warn!(aircraft = %ac.name, spoke = %NodeRef::Spoke(spoke), %returned, "route aborted: spoke retired");
            incidents.push(Incident::AircraftRouteAbort { period: now, aircraft: ac.id, spoke, returned });
        }
        incidents
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Hand a route to an idle aircraft and load its cargo from the hub.
    ///
    /// The aircraft moves to `Loading`; the first leg opens once loading
    /// completes during [`advance`](Self::advance).
    pub fn assign(&mut self, assignment: &Assignment, ledger: &mut ResourceLedger) -> FleetResult<()> {
        let id = assignment.aircraft;
        let ac = self.get_mut(id)?;
        if !ac.state.is_available() {
            return Err(FleetError::NotAvailable(id, ac.state));
        }
        if assignment.stops.is_empty() {
            return Err(FleetError::EmptyRoute(id));
        }
        let total = assignment.total_cargo();
        if total.total() > ac.capacity {
            return Err(FleetError::CapacityExceeded {
                aircraft: id,
                requested: total.total(),
                capacity: ac.capacity,
            });
        }
        if let Some(stop) = assignment.stops.iter().find(|s| !ledger.is_active(s.spoke)) {
            return Err(FleetError::InactiveSpoke(id, stop.spoke));
        }

        let loaded = ledger.withdraw_from_hub(total);
        ac.cargo = loaded;
        ac.route = assignment.stops.iter().copied().collect();
        ac.state = AircraftState::Loading;
        ac.phase_elapsed = 0.0;
        ac.on_sortie = true;
        debug!(aircraft = %ac.name, cargo = %loaded, stops = ac.route.len(), "loading");
        Ok(())
    }

    // ── Maintenance ───────────────────────────────────────────────────────

    /// External maintenance trigger.
    ///
    /// Ground states break immediately (cargo being loaded goes back to the
    /// hub; an unloading aircraft drops all remaining cargo at its spoke).
    /// Aircraft in flight finish the current leg first.
    pub fn break_aircraft(
        &mut self,
        id: AircraftId,
        now: Period,
        ledger: &mut ResourceLedger,
    ) -> FleetResult<Vec<FleetEvent>> {
        let hub = self.hub;
        let ac = self.get_mut(id)?;
        if ac.state.is_broken() || ac.maintenance_due {
            return Err(FleetError::AlreadyBroken(id));
        }
        let mut events = Vec::new();
        match ac.state {
            AircraftState::IdleAtHub | AircraftState::Resting | AircraftState::Loading => {
                ledger.return_to_hub(ac.cargo);
                ac.reset_to_hub(hub, AircraftState::BrokenAtHub);
                ac.rest_until = None;
                events.push(FleetEvent::Broken { aircraft: id, at: NodeRef::Hub });
            }
            AircraftState::Unloading => {
                if let NodeRef::Spoke(s) = ac.location {
                    drop_remaining_cargo(ac, s, now, ledger);
                }
                ac.state = AircraftState::BrokenAtSpoke;
                ac.phase_elapsed = 0.0;
                events.push(FleetEvent::Broken { aircraft: id, at: ac.location });
            }
            _ => ac.maintenance_due = true,
        }
        info!(aircraft = %ac.name, state = %ac.state, "maintenance event");
        Ok(events)
    }

    /// Return a broken aircraft to service.
    ///
    /// At the hub it becomes idle immediately; at a spoke it departs on an
    /// empty ferry leg home.
    pub fn repair_aircraft(&mut self, id: AircraftId, distances: &DistanceModel) -> FleetResult<Vec<FleetEvent>> {
        let ac = self.get_mut(id)?;
        match ac.state {
            AircraftState::BrokenAtHub => ac.state = AircraftState::IdleAtHub,
            AircraftState::BrokenAtSpoke => {
                ac.on_sortie = false;
                ac.begin_leg(NodeRef::Hub, distances);
                ac.state = AircraftState::Departing;
            }
            _ => return Err(FleetError::NotBroken(id)),
        }
        info!(aircraft = %ac.name, state = %ac.state, "repaired");
        Ok(vec![FleetEvent::Repaired { aircraft: id }])
    }

    // ── Advance ───────────────────────────────────────────────────────────

    /// Give every aircraft one period of flight hours.
    pub fn advance(
        &mut self,
        now: Period,
        timing: &FlightTiming,
        distances: &DistanceModel,
        ledger: &mut ResourceLedger,
    ) -> Vec<FleetEvent> {
        let mut events = Vec::new();
        let mut ctx = AdvanceCtx { now, timing, distances, ledger, events: &mut events };
        for ac in &mut self.aircraft {
            advance_one(ac, &mut ctx);
        }
        events
    }
}

/// Run one aircraft's state machine until its hour budget is spent or it
/// reaches a state that waits on something other than time.
fn advance_one(ac: &mut Aircraft, ctx: &mut AdvanceCtx<'_>) {
    let mut budget = ctx.timing.period_hours;
    while budget > EPS {
        match ac.state {
            AircraftState::IdleAtHub
            | AircraftState::Resting
            | AircraftState::BrokenAtHub
            | AircraftState::BrokenAtSpoke => break,

            AircraftState::Loading => {
                if ac.spend(&mut budget, ctx.timing.load_hours) {
                    ctx.events.push(FleetEvent::Loaded { aircraft: ac.id, cargo: ac.cargo });
                    depart_for_next(ac, ctx);
                }
            }

            AircraftState::Departing => {
                if ac.spend(&mut budget, ctx.timing.departure_hours) {
                    ac.state = AircraftState::Enroute;
                }
            }

            AircraftState::Enroute => {
                let remaining = ac.remaining_distance();
                if remaining <= ctx.timing.arrival_threshold {
                    ac.state = AircraftState::Arriving;
                    continue;
                }
                let to_threshold = (remaining - ctx.timing.arrival_threshold) / ac.cruise_speed;
                if budget >= to_threshold {
                    ac.advance_leg(to_threshold, ctx.distances);
                    budget -= to_threshold;
                    ac.state = AircraftState::Arriving;
                } else {
                    ac.advance_leg(budget, ctx.distances);
                    budget = 0.0;
                }
            }

            AircraftState::Arriving => {
                let left = ac.leg.as_ref().map_or(0.0, |l| l.remaining_hours());
                if budget >= left {
                    ac.advance_leg(left, ctx.distances);
                    budget -= left;
                    arrive(ac, ctx);
                } else {
                    ac.advance_leg(budget, ctx.distances);
                    budget = 0.0;
                }
            }

            AircraftState::Unloading => {
                if ac.spend(&mut budget, ctx.timing.unload_hours) {
                    depart_for_next(ac, ctx);
                }
            }
        }
    }
}

/// Open the leg to the next stop, or home when the route is done.
fn depart_for_next(ac: &mut Aircraft, ctx: &mut AdvanceCtx<'_>) {
    let to = ac.route.front().map_or(NodeRef::Hub, |s| NodeRef::Spoke(s.spoke));
    let from = ac.location;
    ac.begin_leg(to, ctx.distances);
    ac.state = AircraftState::Departing;
    ctx.events.push(FleetEvent::Departed { aircraft: ac.id, from, to });
}

/// Leg complete: deliver at a spoke, or finish the sortie at the hub.
fn arrive(ac: &mut Aircraft, ctx: &mut AdvanceCtx<'_>) {
    let Some(leg) = ac.leg.take() else { return };
    let at = leg.destination;
    ac.location = at;
    ac.position = ctx.distances.position(at);
    ac.legs_flown += 1;

    match at {
        NodeRef::Spoke(spoke) => {
            if ac.route.front().is_some_and(|s| s.spoke == spoke) {
                if let Some(stop) = ac.route.pop_front() {
                    deliver(ac, spoke, stop.cargo, ctx.now, ctx.ledger);
                    ctx.events.push(FleetEvent::Delivered { aircraft: ac.id, spoke, cargo: stop.cargo });
                }
            }
            if ac.maintenance_due {
                ac.maintenance_due = false;
                drop_remaining_cargo(ac, spoke, ctx.now, ctx.ledger);
                ac.state = AircraftState::BrokenAtSpoke;
                ctx.events.push(FleetEvent::Broken { aircraft: ac.id, at });
            } else {
                ac.state = AircraftState::Unloading;
                ac.phase_elapsed = 0.0;
            }
        }
        NodeRef::Hub => {
            if !ac.cargo.is_empty() {
                ctx.ledger.return_to_hub(ac.cargo);
                ac.cargo = Stock::ZERO;
            }
            if ac.on_sortie {
                ac.on_sortie = false;
                ac.sorties_total += 1;
                ac.sorties_since_rest += 1;
                ctx.events.push(FleetEvent::SortieComplete { aircraft: ac.id });
            }
            if ac.maintenance_due {
                ac.maintenance_due = false;
                ac.state = AircraftState::BrokenAtHub;
                ctx.events.push(FleetEvent::Broken { aircraft: ac.id, at });
            } else if ac.sorties_since_rest >= ac.sorties_before_rest {
                ac.sorties_since_rest = 0;
                ac.state = AircraftState::Resting;
                ac.rest_until = Some(ctx.now.offset(1 + ac.rest_periods as u64));
                debug!(aircraft = %ac.name, until = ?ac.rest_until, "resting");
                ctx.events.push(FleetEvent::RestStarted { aircraft: ac.id });
            } else {
                ac.state = AircraftState::IdleAtHub;
            }
        }
    }
}

/// Unload `cargo` into `spoke`'s arrivals for the next period.
fn deliver(ac: &mut Aircraft, spoke: SpokeId, cargo: Stock, now: Period, ledger: &mut ResourceLedger) {
    let (left, _) = ac.cargo.saturating_sub(cargo);
    ac.cargo = left;
    ledger.schedule_delivery(now.next(), spoke, cargo);
}

/// Unload everything still on board at `spoke` and forget later stops.
fn drop_remaining_cargo(ac: &mut Aircraft, spoke: SpokeId, now: Period, ledger: &mut ResourceLedger) {
    let cargo = ac.cargo;
    if !cargo.is_empty() {
        ledger.schedule_delivery(now.next(), spoke, cargo);
    }
    ac.cargo = Stock::ZERO;
    ac.route.clear();
}
