//! Incidents: recoverable anomalies recorded during a run.
//!
//! None of these abort the simulation.  Each is logged through `tracing`,
//! forwarded to the observer and counted in the run summary.

use std::fmt;

use crate::{AircraftId, Period, Resource, SpokeId, Stock};

/// A recoverable anomaly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Incident {
    /// Smart targeting saw spokes with a deficit but could not produce a
    /// scored, loadable assignment; dispatch fell back to pair rotation.
    SchedulingInconsistency {
        period: Period,
        aircraft: AircraftId,
        detail: String,
    },

    /// A withdrawal asked for more units than were held.  The balance was
    /// clamped at zero.  `spoke == None` means the hub.
    ResourceInvariantViolation {
        period: Period,
        spoke: Option<SpokeId>,
        resource: Resource,
        requested: u32,
        available: u32,
    },

    /// An aircraft's leg targeted a spoke that is no longer active.  Its
    /// cargo went back to the hub and the aircraft returned to idle.
    AircraftRouteAbort {
        period: Period,
        aircraft: AircraftId,
        spoke: SpokeId,
        returned: Stock,
    },

    /// A scheduled delivery reached a spoke that is retired or unknown and
    /// was discarded.
    ArrivalDropped {
        period: Period,
        spoke: SpokeId,
        cargo: Stock,
    },

    /// PM upkeep could not be paid because A or B was exhausted.
    /// `missing` holds one unit for each resource that was unavailable.
    Shortage {
        period: Period,
        spoke: SpokeId,
        missing: Stock,
    },
}

impl Incident {
    /// The period during which the incident occurred.
    pub fn period(&self) -> Period {
        match self {
            Incident::SchedulingInconsistency { period, .. }
            | Incident::ResourceInvariantViolation { period, .. }
            | Incident::AircraftRouteAbort { period, .. }
            | Incident::ArrivalDropped { period, .. }
            | Incident::Shortage { period, .. } => *period,
        }
    }

    /// Stable snake_case tag, used as the `kind` column in output tables.
    pub fn kind(&self) -> &'static str {
        match self {
            Incident::SchedulingInconsistency { .. } => "scheduling_inconsistency",
            Incident::ResourceInvariantViolation { .. } => "resource_invariant_violation",
            Incident::AircraftRouteAbort { .. } => "aircraft_route_abort",
            Incident::ArrivalDropped { .. } => "arrival_dropped",
            Incident::Shortage { .. } => "shortage",
        }
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incident::SchedulingInconsistency { period, aircraft, detail } => {
                write!(f, "{period}: {aircraft} fell back to pair rotation ({detail})")
            }
            Incident::ResourceInvariantViolation { period, spoke, resource, requested, available } => {
                let at = match spoke {
                    Some(s) => crate::NodeRef::Spoke(*s),
                    None => crate::NodeRef::Hub,
                };
                write!(
                    f,
                    "{period}: {at} asked for {requested} {resource} with {available} on hand"
                )
            }
            Incident::AircraftRouteAbort { period, aircraft, spoke, returned } => {
                write!(f, "{period}: {aircraft} aborted leg to retired {spoke}, returned {returned}")
            }
            Incident::ArrivalDropped { period, spoke, cargo } => {
                write!(f, "{period}: delivery of {cargo} to {spoke} dropped")
            }
            Incident::Shortage { period, spoke, missing } => {
                write!(f, "{period}: {spoke} missed PM upkeep (short {missing})")
            }
        }
    }
}
