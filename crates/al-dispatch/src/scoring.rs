//! The scoring function.
//!
//! ```text
//! score(S) = w_ops·ops_gain(S) + w_need·need(S)
//!          − w_dist·dist_norm(S) − w_cong·congestion(S) − fairness(S)
//!          + jitter
//! ```
//!
//! Deficits are fractions of the resolved target, so `ops_gain` and `need`
//! lie in `[0, 1]` like a typical `dist_norm`.  For second legs the two
//! benefit terms are scaled by `second_leg_multiplier`.

use tracing::trace;

use al_core::{NodeRef, Resource, ResourceTargets, SimRng, SpokeId, Stock};

use crate::{DispatchContext, PassState, Stage};

/// One candidate's score and its breakdown.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpokeScore {
    pub spoke:      SpokeId,
    pub ops_gain:   f64,
    pub need:       f64,
    pub dist_norm:  f64,
    pub congestion: f64,
    pub fairness:   f64,
    pub jitter:     f64,
    pub total:      f64,
}

/// `max(0, target − stock) / target` per resource.
pub fn deficit_fractions(stock: Stock, targets: &ResourceTargets) -> [f64; 4] {
    let mut out = [0.0; 4];
    for r in Resource::ALL {
        let target = targets.get(r).max(1);
        out[r.index()] = target.saturating_sub(stock[r]) as f64 / target as f64;
    }
    out
}

/// Deficit of the resource(s) the current stage is trying to unlock.
pub fn ops_gain(stage: Stage, deficits: &[f64; 4]) -> f64 {
    match stage {
        Stage::APriming => deficits[Resource::A.index()],
        Stage::BPriming => deficits[Resource::B.index()],
        Stage::Ops => (deficits[Resource::C.index()] + deficits[Resource::D.index()]) / 2.0,
    }
}

/// Weighted mean of all four deficits.
pub fn need_score(deficits: &[f64; 4], weights: &[f64; 4]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    deficits.iter().zip(weights).map(|(d, w)| d * w).sum::<f64>() / total
}

/// Score every candidate spoke reachable from `from`, ascending by spoke id.
///
/// Candidates are active spokes with `need > 0`, not capped out, not `from`
/// itself and not `exclude`.  Exactly one jitter draw is made per candidate,
/// in ascending spoke order.  Non-finite totals are returned as-is; callers
/// decide what to do with them.
pub fn score_candidates(
    from:             NodeRef,
    benefit_scale:    f64,
    exclude:          Option<SpokeId>,
    pass:             &PassState,
    ctx:              &DispatchContext<'_>,
    rng:              &mut SimRng,
) -> Vec<SpokeScore> {
    let cfg = ctx.config;
    let mut out = Vec::new();
    for spoke in ctx.ledger.active_spokes() {
        if Some(spoke) == exclude || NodeRef::Spoke(spoke) == from {
            continue;
        }
        if pass.reservations.is_capped(spoke, cfg.max_aircraft_per_spoke_per_period) {
            continue;
        }
        let deficits = deficit_fractions(pass.projected(spoke), &ctx.targets);
        let need = need_score(&deficits, &cfg.need_weights);
        if need <= 0.0 {
            continue;
        }
        let ops_gain = ops_gain(pass.stage, &deficits);
        let dist_norm = ctx.distances.normalized_distance(from, NodeRef::Spoke(spoke));
        let congestion = pass.reservations.count(spoke) as f64 * cfg.congestion_coefficient;
        let fairness = ctx.fairness.penalty(spoke, cfg.fairness_decay);
        let jitter = rng.jitter(cfg.jitter);

        let total = benefit_scale * (cfg.w_ops * ops_gain + cfg.w_need * need)
            - cfg.w_dist * dist_norm
            - cfg.w_cong * congestion
            - fairness
            + jitter;

        trace!(
            spoke = %NodeRef::Spoke(spoke), from = %from,
            ops_gain, need, dist_norm, congestion, fairness, jitter, total,
            "scored"
        );
        out.push(SpokeScore { spoke, ops_gain, need, dist_norm, congestion, fairness, jitter, total });
    }
    out
}

/// Finite-scored candidates, best first; ties go to the lower spoke id.
pub fn ranked(scores: &[SpokeScore]) -> Vec<SpokeScore> {
    let mut out: Vec<SpokeScore> = scores.iter().copied().filter(|s| s.total.is_finite()).collect();
    out.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.spoke.cmp(&b.spoke)));
    out
}
