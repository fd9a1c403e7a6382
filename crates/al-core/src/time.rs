//! Simulation time model.
//!
//! # Design
//!
//! Time advances in discrete half-day **periods**.  Even periods are the AM
//! half of a day and odd periods the PM half:
//!
//!   day   = period / 2
//!   phase = if period % 2 == 0 { AM } else { PM }
//!
//! Using an integer period as the canonical time unit keeps all arrival and
//! rest arithmetic exact.  Within a period, aircraft consume a floating-point
//! budget of flight hours (see `FlightTiming::period_hours`).

use std::fmt;

// ── Period ───────────────────────────────────────────────────────────────────

/// An absolute simulation period counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period(pub u64);

impl Period {
    pub const ZERO: Period = Period(0);

    /// The period immediately after `self`.
    #[inline]
    pub fn next(self) -> Period {
        Period(self.0 + 1)
    }

    #[inline]
    pub fn offset(self, n: u64) -> Period {
        Period(self.0 + n)
    }

    /// Day number, starting at 0.
    #[inline]
    pub fn day(self) -> u64 {
        self.0 / 2
    }

    #[inline]
    pub fn phase(self) -> Phase {
        if self.0 % 2 == 0 { Phase::Am } else { Phase::Pm }
    }

    #[inline]
    pub fn is_pm(self) -> bool {
        self.phase() == Phase::Pm
    }
}

impl std::ops::Add<u64> for Period {
    type Output = Period;
    #[inline]
    fn add(self, rhs: u64) -> Period {
        Period(self.0 + rhs)
    }
}

impl std::ops::Sub for Period {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Period) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ── Phase ────────────────────────────────────────────────────────────────────

/// Half of a simulated day.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Am,
    Pm,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Am => "AM",
            Phase::Pm => "PM",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimClock ─────────────────────────────────────────────────────────────────

/// Tracks the period about to be simulated.
///
/// Owned by the period scheduler; advanced exactly once per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The period the next tick will simulate.
    pub current_period: Period,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one period.
    #[inline]
    pub fn advance(&mut self) {
        self.current_period = self.current_period.next();
    }

    /// Number of periods fully simulated so far.
    #[inline]
    pub fn periods_elapsed(&self) -> u64 {
        self.current_period.0
    }

    #[inline]
    pub fn day(&self) -> u64 {
        self.current_period.day()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.current_period.phase()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (day {} {})", self.current_period, self.day(), self.phase())
    }
}
