//! Pair rotation: the fixed pair-order planner.
//!
//! Used as the whole policy in `DispatchMode::PairRotation` and as the
//! fallback when smart targeting cannot resolve a route.

use tracing::debug;

use al_core::{SimRng, SpokeId};
use al_fleet::{Aircraft, Stop};

use crate::payload::{plan_pair_payload, plan_payload};
use crate::smart::RouteDisplay;
use crate::{DispatchContext, PassState, Selection, TargetingPolicy};

/// Walks a fixed list of spoke pairs from a persistent cursor.
#[derive(Clone, Debug)]
pub struct PairRotation {
    pairs:  Vec<(SpokeId, SpokeId)>,
    cursor: usize,
    /// Pairs already flown this period.
    used:   Vec<bool>,
}

impl PairRotation {
    pub fn new(pairs: Vec<(SpokeId, SpokeId)>) -> Self {
        let used = vec![false; pairs.len()];
        Self { pairs, cursor: 0, used }
    }

    /// Index of the next pair to try.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether `spoke` can take a stop this pass.
    fn usable(spoke: SpokeId, pass: &PassState, ctx: &DispatchContext<'_>) -> bool {
        ctx.ledger.is_active(spoke)
            && !pass.reservations.is_capped(spoke, ctx.config.max_aircraft_per_spoke_per_period)
    }
}

impl TargetingPolicy for PairRotation {
    fn name(&self) -> &'static str {
        "pair_rotation"
    }

    fn begin_period(&mut self) {
        self.used.iter_mut().for_each(|u| *u = false);
    }

    fn select(
        &mut self,
        aircraft: &Aircraft,
        pass:     &PassState,
        ctx:      &DispatchContext<'_>,
        _rng:     &mut SimRng,
    ) -> Selection {
        let n = self.pairs.len();
        let hub = ctx.hub_available();
        for k in 0..n {
            let idx = (self.cursor + k) % n;
            if self.used[idx] {
                continue;
            }
            let (i, j) = self.pairs[idx];
            let (ok_i, ok_j) = (Self::usable(i, pass, ctx), Self::usable(j, pass, ctx));

            let stops: Vec<Stop> = match (ok_i, ok_j) {
                (true, true) if i != j => {
                    let (ci, cj) =
                        plan_pair_payload(pass.projected(i), pass.projected(j), pass.stage, aircraft.capacity, hub);
                    [Stop { spoke: i, cargo: ci }, Stop { spoke: j, cargo: cj }].into_iter().collect()
                }
                (true, _) | (_, true) => {
                    let s = if ok_i { i } else { j };
                    let cargo = plan_payload(pass.projected(s), &ctx.targets, pass.stage, aircraft.capacity, hub);
                    vec![Stop { spoke: s, cargo }]
                }
                (false, false) => continue,
            };
            let stops: Vec<Stop> = stops.into_iter().filter(|s| !s.cargo.is_empty()).collect();
            if stops.is_empty() {
                continue;
            }

            self.used[idx] = true;
            self.cursor = (idx + 1) % n;
            debug!(aircraft = %aircraft.name, pair = idx, route = %RouteDisplay(&stops), "pair route");
            return Selection::Route { stops, scores: Vec::new() };
        }
        Selection::Idle
    }
}
