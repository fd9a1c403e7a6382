//! `ResourceLedger`: spoke stock, hub supply, and the per-period pipeline.
//!
//! # Per-period order
//!
//! ```text
//! apply_arrivals(p) → evaluate_flags() → consume_pm(s) (PM only)
//!                   → try_run_op(s) for each active spoke, ascending
//! ```
//!
//! [`ResourceLedger::run_period`] performs the whole sequence; the individual
//! steps are public so callers and tests can drive them one at a time.
//!
//! # Incidents
//!
//! Nothing here fails on bad stock arithmetic.  A withdrawal that exceeds the
//! balance is clamped to zero and recorded as
//! `Incident::ResourceInvariantViolation`; deliveries to retired spokes are
//! dropped and recorded as `Incident::ArrivalDropped`.  The scheduler drains
//! the buffer with [`ResourceLedger::take_incidents`] once per tick.

use tracing::{debug, warn};

use al_core::{AirliftConfig, Incident, Period, Point, Resource, SpokeId, Stock};

use crate::{ArrivalQueue, Delivery, LedgerError, LedgerResult, Spoke};

/// Whether PM upkeep is due in `period` for an upkeep cadence of
/// `interval_days` (every PM when the interval is one day).
pub fn upkeep_due(period: Period, interval_days: u32) -> bool {
    let interval = interval_days.max(1) as u64;
    period.is_pm() && period.day() % interval == interval - 1
}

/// What one call to [`ResourceLedger::run_period`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PeriodReport {
    pub deliveries: usize,
    pub upkeep_paid: u32,
    pub shortages: u32,
    pub ops_run: u32,
}

/// Hub-side supply.
#[derive(Clone, Debug, PartialEq)]
pub struct HubStock {
    /// Remaining finite supply.  `None` = unlimited.
    pub remaining: Option<Stock>,
    /// Units loaded onto aircraft so far (net of returns).
    pub dispatched: Stock,
}

/// Owner of all resource state.
#[derive(Clone, Debug)]
pub struct ResourceLedger {
    spokes: Vec<Spoke>,
    hub: HubStock,
    arrivals: ArrivalQueue,
    /// Period being processed; stamps incidents.
    now: Period,
    incidents: Vec<Incident>,
}

impl ResourceLedger {
    /// One spoke per position, each starting with `initial`.
    pub fn new(positions: &[Point], initial: Stock, hub_supply: Option<Stock>) -> Self {
        let spokes = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Spoke::new(SpokeId(i as u32), p, initial))
            .collect();
        Self {
            spokes,
            hub: HubStock { remaining: hub_supply, dispatched: Stock::ZERO },
            arrivals: ArrivalQueue::new(),
            now: Period::ZERO,
            incidents: Vec::new(),
        }
    }

    pub fn from_config(config: &AirliftConfig) -> Self {
        let (_, positions) = config.layout.positions();
        Self::new(&positions, config.initial_stock, config.hub_supply)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn spokes(&self) -> &[Spoke] {
        &self.spokes
    }

    #[inline]
    pub fn spoke_count(&self) -> usize {
        self.spokes.len()
    }

    pub fn spoke(&self, id: SpokeId) -> LedgerResult<&Spoke> {
        self.spokes.get(id.index()).ok_or(LedgerError::SpokeNotFound(id))
    }

    fn spoke_mut(&mut self, id: SpokeId) -> LedgerResult<&mut Spoke> {
        self.spokes.get_mut(id.index()).ok_or(LedgerError::SpokeNotFound(id))
    }

    pub fn stock(&self, id: SpokeId) -> LedgerResult<Stock> {
        Ok(self.spoke(id)?.stock)
    }

    /// `true` for a known spoke that has not been retired.
    #[inline]
    pub fn is_active(&self, id: SpokeId) -> bool {
        self.spokes.get(id.index()).is_some_and(|s| s.active)
    }

    /// Active spoke ids in ascending order.
    pub fn active_spokes(&self) -> impl Iterator<Item = SpokeId> + '_ {
        self.spokes.iter().filter(|s| s.active).map(|s| s.id)
    }

    #[inline]
    pub fn hub(&self) -> &HubStock {
        &self.hub
    }

    #[inline]
    pub fn arrivals(&self) -> &ArrivalQueue {
        &self.arrivals
    }

    pub fn total_ops(&self) -> u64 {
        self.spokes.iter().map(|s| s.ops_total).sum()
    }

    pub fn ops_by_spoke(&self) -> Vec<u64> {
        self.spokes.iter().map(|s| s.ops_total).collect()
    }

    // ── Pipeline steps ────────────────────────────────────────────────────

    /// Move every delivery due at or before `period` into spoke stock.
    ///
    /// Deliveries addressed to retired or unknown spokes are dropped and
    /// logged; this never fails.  Returns the number of deliveries applied.
    pub fn apply_arrivals(&mut self, period: Period) -> usize {
        self.now = period;
        let mut applied = 0;
        for Delivery { spoke, cargo } in self.arrivals.drain_through(period) {
            match self.spokes.get_mut(spoke.index()) {
                Some(s) if s.active => {
                    s.stock += cargo;
                    applied += 1;
                }
                _ => {
                    warn!(spoke = %spoke, %cargo, period = %period, "delivery to inactive spoke dropped");
                    self.incidents.push(Incident::ArrivalDropped { period, spoke, cargo });
                }
            }
        }
        applied
    }

    /// Refresh every spoke's operational flag from its current stock.
    pub fn evaluate_flags(&mut self) {
        for s in &mut self.spokes {
            s.operational = s.can_run_op();
        }
    }

    /// PM upkeep: take one A and one B when both are positive.
    ///
    /// Otherwise records a shortage and leaves stock untouched.  Returns
    /// `Ok(true)` when upkeep was paid.  Retired spokes are skipped.
    pub fn consume_pm(&mut self, id: SpokeId) -> LedgerResult<bool> {
        let period = self.now;
        let spoke = self.spoke_mut(id)?;
        if !spoke.active {
            return Ok(false);
        }
        let (a, b) = (spoke.stock[Resource::A], spoke.stock[Resource::B]);
        if a > 0 && b > 0 {
            spoke.stock[Resource::A] -= 1;
            spoke.stock[Resource::B] -= 1;
            return Ok(true);
        }
        spoke.shortages += 1;
        let missing = Stock::new((a == 0) as u32, (b == 0) as u32, 0, 0);
        debug!(spoke = %id, period = %period, %missing, "PM upkeep shortage");
        self.incidents.push(Incident::Shortage { period, spoke: id, missing });
        Ok(false)
    }

    /// Run one operation if all four resources are positive.
    ///
    /// Consumes one C and one D; A and B only gate the operation.
    pub fn try_run_op(&mut self, id: SpokeId) -> LedgerResult<bool> {
        let spoke = self.spoke_mut(id)?;
        if !spoke.can_run_op() {
            return Ok(false);
        }
        spoke.stock[Resource::C] -= 1;
        spoke.stock[Resource::D] -= 1;
        spoke.ops_total += 1;
        Ok(true)
    }

    /// The full ledger pipeline for `period`.
    pub fn run_period(&mut self, period: Period, upkeep_interval_days: u32) -> PeriodReport {
        let mut report = PeriodReport { deliveries: self.apply_arrivals(period), ..Default::default() };
        self.evaluate_flags();

        let ids: Vec<SpokeId> = self.active_spokes().collect();
        if upkeep_due(period, upkeep_interval_days) {
            for &id in &ids {
                match self.consume_pm(id) {
                    Ok(true) => report.upkeep_paid += 1,
                    Ok(false) => report.shortages += 1,
                    Err(_) => {}
                }
            }
        }
        for &id in &ids {
            if let Ok(true) = self.try_run_op(id) {
                report.ops_run += 1;
            }
        }
        report
    }

    // ── Deliveries and hub ────────────────────────────────────────────────

    /// Queue `cargo` to land at `spoke` at the start of `period`.
    pub fn schedule_delivery(&mut self, period: Period, spoke: SpokeId, cargo: Stock) {
        if cargo.is_empty() {
            return;
        }
        self.arrivals.push(period, Delivery { spoke, cargo });
    }

    /// What the hub could load right now.  `None` = unlimited.
    #[inline]
    pub fn hub_available(&self) -> Option<Stock> {
        self.hub.remaining
    }

    /// Load `cargo` from the hub.
    ///
    /// With finite supply, any excess over what remains is clamped and
    /// logged.  Returns what was actually loaded.
    pub fn withdraw_from_hub(&mut self, cargo: Stock) -> Stock {
        let loaded = match self.hub.remaining {
            None => cargo,
            Some(have) => {
                let mut left = have;
                let mut loaded = Stock::ZERO;
                for (r, want) in cargo.iter() {
                    let got = debit(&mut left, r, want, None, self.now, &mut self.incidents);
                    loaded.set(r, got);
                }
                self.hub.remaining = Some(left);
                loaded
            }
        };
        self.hub.dispatched += loaded;
        loaded
    }

    /// Put undelivered cargo back into hub supply.
    pub fn return_to_hub(&mut self, cargo: Stock) {
        if let Some(have) = self.hub.remaining.as_mut() {
            *have += cargo;
        }
        let (net, _) = self.hub.dispatched.saturating_sub(cargo);
        self.hub.dispatched = net;
    }

    /// Withdraw `units` of `resource` from a spoke, clamped at zero.
    ///
    /// Returns the units actually removed.  Used by external adjustments;
    /// the normal pipeline never overdraws.
    pub fn withdraw_from_spoke(&mut self, id: SpokeId, resource: Resource, units: u32) -> LedgerResult<u32> {
        let now = self.now;
        let idx = id.index();
        let spoke = self.spokes.get_mut(idx).ok_or(LedgerError::SpokeNotFound(id))?;
        Ok(debit(&mut spoke.stock, resource, units, Some(id), now, &mut self.incidents))
    }

    /// Overwrite a spoke's stock (scenario setup and external adjustments).
    pub fn set_stock(&mut self, id: SpokeId, stock: Stock) -> LedgerResult<()> {
        let spoke = self.spoke_mut(id)?;
        spoke.stock = stock;
        spoke.operational = spoke.can_run_op();
        Ok(())
    }

    // ── Topology ──────────────────────────────────────────────────────────

    /// Take a spoke out of service.  Its stock is frozen; later deliveries
    /// to it are dropped.
    pub fn retire_spoke(&mut self, id: SpokeId) -> LedgerResult<()> {
        let spoke = self.spoke_mut(id)?;
        spoke.active = false;
        spoke.operational = false;
        Ok(())
    }

    /// Drain incidents recorded since the last call.
    pub fn take_incidents(&mut self) -> Vec<Incident> {
        std::mem::take(&mut self.incidents)
    }
}

/// Subtract `want` units of `r` from `stock`, clamping at zero.
///
/// An overdraw is logged and recorded; the balance never goes negative.
fn debit(
    stock: &mut Stock,
    r: Resource,
    want: u32,
    spoke: Option<SpokeId>,
    period: Period,
    incidents: &mut Vec<Incident>,
) -> u32 {
    let have = stock[r];
    if want <= have {
        stock[r] = have - want;
        return want;
    }
    warn!(?spoke, resource = %r, requested = want, available = have, "withdrawal clamped at zero");
    incidents.push(Incident::ResourceInvariantViolation {
        period,
        spoke,
        resource: r,
        requested: want,
        available: have,
    });
    stock[r] = 0;
    have
}
