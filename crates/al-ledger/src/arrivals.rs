//! `ArrivalQueue`: deliveries keyed by the period they become usable.
//!
//! Aircraft unload into this queue rather than directly into spoke stock, so
//! a delivery made during period `p` is scheduled for `p + 1` and can never
//! unlock an operation in the period it landed.
//!
//! `BTreeMap` keeps periods ordered; draining is O(log W) for W distinct
//! pending periods, which is at most a handful.

use std::collections::BTreeMap;

use al_core::{Period, SpokeId, Stock};

/// Cargo bound for one spoke.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delivery {
    pub spoke: SpokeId,
    pub cargo: Stock,
}

/// Pending deliveries, grouped by arrival period.
#[derive(Clone, Debug, Default)]
pub struct ArrivalQueue {
    inner: BTreeMap<Period, Vec<Delivery>>,
    /// Cached delivery count for O(1) `len()`.
    total: usize,
}

impl ArrivalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `delivery` to land at the start of `period`.
    pub fn push(&mut self, period: Period, delivery: Delivery) {
        self.inner.entry(period).or_default().push(delivery);
        self.total += 1;
    }

    /// Remove and return every delivery due at or before `period`, oldest
    /// first.  Late entries (scheduled for a period already simulated) are
    /// included so nothing is stranded.
    pub fn drain_through(&mut self, period: Period) -> Vec<Delivery> {
        let later = self.inner.split_off(&period.next());
        let due = std::mem::replace(&mut self.inner, later);
        let out: Vec<Delivery> = due.into_values().flatten().collect();
        self.total -= out.len();
        out
    }

    /// Sum of cargo still in the queue for `spoke`.
    pub fn pending_for(&self, spoke: SpokeId) -> Stock {
        let mut sum = Stock::ZERO;
        for d in self.inner.values().flatten().filter(|d| d.spoke == spoke) {
            sum += d.cargo;
        }
        sum
    }

    /// The earliest period with at least one pending delivery.
    pub fn next_period(&self) -> Option<Period> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
