//! Per-period reservations and persistent fairness counters.
//!
//! Both are owned by the `DispatchEngine`.  Reservations are cleared at the
//! start of every pass; fairness counters live for the whole run.

use al_core::SpokeId;

// ── ReservationTable ──────────────────────────────────────────────────────────

/// Aircraft assigned to each spoke during the current period.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservationTable {
    counts: Vec<u32>,
}

impl ReservationTable {
    pub fn new(spoke_count: usize) -> Self {
        Self { counts: vec![0; spoke_count] }
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    pub fn reserve(&mut self, spoke: SpokeId) {
        if let Some(c) = self.counts.get_mut(spoke.index()) {
            *c += 1;
        }
    }

    #[inline]
    pub fn count(&self, spoke: SpokeId) -> u32 {
        self.counts.get(spoke.index()).copied().unwrap_or(0)
    }

    /// `true` when `cap` is set and already reached for `spoke`.
    #[inline]
    pub fn is_capped(&self, spoke: SpokeId, cap: Option<u32>) -> bool {
        cap.is_some_and(|cap| self.count(spoke) >= cap)
    }

    /// Sum over all spokes.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

// ── FairnessState ─────────────────────────────────────────────────────────────

/// Decaying per-spoke record of recent service.
///
/// A service adds 1 to the spoke's counter immediately, so later aircraft in
/// the same pass already see it.  At period end, counters of spokes that
/// were not serviced are multiplied by `fairness_decay`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FairnessState {
    recent:   Vec<f64>,
    serviced: Vec<bool>,
}

impl FairnessState {
    pub fn new(spoke_count: usize) -> Self {
        Self { recent: vec![0.0; spoke_count], serviced: vec![false; spoke_count] }
    }

    pub fn record_service(&mut self, spoke: SpokeId) {
        let i = spoke.index();
        if i < self.recent.len() {
            self.recent[i] += 1.0;
            self.serviced[i] = true;
        }
    }

    #[inline]
    pub fn recent(&self, spoke: SpokeId) -> f64 {
        self.recent.get(spoke.index()).copied().unwrap_or(0.0)
    }

    /// `recent × (1 − decay)`.
    #[inline]
    pub fn penalty(&self, spoke: SpokeId, decay: f64) -> f64 {
        self.recent(spoke) * (1.0 - decay)
    }

    /// Decay every spoke not serviced since the last call.
    pub fn end_period(&mut self, decay: f64) {
        for (r, s) in self.recent.iter_mut().zip(self.serviced.iter_mut()) {
            if !*s {
                *r *= decay;
            }
            *s = false;
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.recent
    }
}
