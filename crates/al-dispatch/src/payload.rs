//! Payload planning: how many units of each resource go to a stop.

use al_core::{Resource, ResourceTargets, Stock};

use crate::Stage;

/// Fill `projected`'s shortfall against `targets`, resource by resource in
/// the stage's priority order, within `capacity` total units and the hub's
/// remaining supply.
///
/// Returns an empty stock when nothing useful can be carried.
pub fn plan_payload(
    projected: Stock,
    targets:   &ResourceTargets,
    stage:     Stage,
    capacity:  u32,
    hub:       Option<Stock>,
) -> Stock {
    let mut out = Stock::ZERO;
    let mut room = capacity;
    for r in stage.priority() {
        if room == 0 {
            break;
        }
        let want = targets.get(r).saturating_sub(projected[r]);
        let supply = hub.map_or(u32::MAX, |h| h[r]);
        let take = want.min(room).min(supply);
        out[r] = take;
        room -= take;
    }
    out
}

/// Two-stop payload used by pair rotation.
///
/// Both stops are first topped up to one unit of the stage's key resources,
/// then to two, alternating between the stops so neither starves the other.
/// Bounded by `capacity` and the hub's supply.
pub fn plan_pair_payload(
    first:    Stock,
    second:   Stock,
    stage:    Stage,
    capacity: u32,
    hub:      Option<Stock>,
) -> (Stock, Stock) {
    let mut fill = PairFill {
        stocks: [first, second],
        out: [Stock::ZERO; 2],
        room: capacity,
        hub,
    };
    use Resource::*;
    match stage {
        Stage::APriming => {
            fill.top_up(A, 1);
            fill.top_up(B, 1);
            fill.top_up(A, 2);
        }
        Stage::BPriming => {
            fill.top_up(B, 1);
            fill.top_up(A, 2);
        }
        Stage::Ops => {
            fill.top_up(C, 1);
            fill.top_up(D, 1);
            fill.top_up(C, 2);
            fill.top_up(D, 2);
        }
    }
    (fill.out[0], fill.out[1])
}

struct PairFill {
    stocks: [Stock; 2],
    out:    [Stock; 2],
    room:   u32,
    hub:    Option<Stock>,
}

impl PairFill {
    /// Raise `r` at both stops (first, then second) to `level`.
    fn top_up(&mut self, r: Resource, level: u32) {
        for k in 0..2 {
            let have = self.stocks[k][r] + self.out[k][r];
            let want = level.saturating_sub(have);
            let supply = self.hub.map_or(u32::MAX, |h| h[r]);
            let take = want.min(self.room).min(supply);
            if take == 0 {
                continue;
            }
            self.out[k][r] += take;
            self.room -= take;
            if let Some(h) = self.hub.as_mut() {
                h[r] -= take;
            }
        }
    }
}
