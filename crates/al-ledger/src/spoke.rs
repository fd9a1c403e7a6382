//! Per-spoke ledger record.

use al_core::{Point, SpokeId, Stock};

/// One spoke's stock and counters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spoke {
    pub id: SpokeId,
    pub position: Point,
    /// Current usable stock.  Unsigned, so never negative.
    pub stock: Stock,
    /// Lifetime count of operations run here.
    pub ops_total: u64,
    /// PM upkeep periods missed because A or B was exhausted.
    pub shortages: u32,
    /// `stock.all_positive()` as evaluated after this period's arrivals.
    pub operational: bool,
    /// `false` once the spoke has been retired; retired spokes take no
    /// deliveries, upkeep, operations, or dispatch.
    pub active: bool,
}

impl Spoke {
    pub fn new(id: SpokeId, position: Point, stock: Stock) -> Self {
        Self {
            id,
            position,
            stock,
            ops_total: 0,
            shortages: 0,
            operational: stock.all_positive(),
            active: true,
        }
    }

    /// Whether an operation could run right now.
    #[inline]
    pub fn can_run_op(&self) -> bool {
        self.active && self.stock.all_positive()
    }
}
