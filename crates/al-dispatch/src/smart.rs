//! Smart targeting: score-ranked first stop plus an optional milk-run
//! second stop.

use tracing::debug;

use al_core::{NodeRef, SimRng, Stock};
use al_fleet::{Aircraft, Stop};

use crate::payload::plan_payload;
use crate::scoring::{ranked, score_candidates};
use crate::{DispatchContext, PassState, Selection, TargetingPolicy};

/// The default policy.
#[derive(Clone, Debug, Default)]
pub struct SmartTargeting;

impl TargetingPolicy for SmartTargeting {
    fn name(&self) -> &'static str {
        "smart"
    }

    fn select(
        &mut self,
        aircraft: &Aircraft,
        pass:     &PassState,
        ctx:      &DispatchContext<'_>,
        rng:      &mut SimRng,
    ) -> Selection {
        let cfg = ctx.config;
        let from = aircraft.location;

        let first_scores = score_candidates(from, 1.0, None, pass, ctx, rng);
        if first_scores.is_empty() {
            return Selection::Idle;
        }

        // Best-scored spoke with something loadable.
        let hub = ctx.hub_available();
        let first = ranked(&first_scores).into_iter().find_map(|s| {
            let cargo = plan_payload(pass.projected(s.spoke), &ctx.targets, pass.stage, aircraft.capacity, hub);
            (!cargo.is_empty()).then_some((s, cargo))
        });
        let Some((first, first_cargo)) = first else {
            // An empty finite hub is an expected state, not a scheduling fault.
            let hub_bound = hub.is_some()
                && ranked(&first_scores).iter().any(|s| {
                    !plan_payload(pass.projected(s.spoke), &ctx.targets, pass.stage, aircraft.capacity, None)
                        .is_empty()
                });
            if hub_bound {
                debug!(aircraft = %aircraft.name, stage = %pass.stage, "hub supply exhausted, staying idle");
                return Selection::Idle;
            }
            let finite = first_scores.iter().filter(|s| s.total.is_finite()).count();
            return Selection::Unresolved(format!(
                "{} candidate(s), {finite} finite score(s), no loadable payload",
                first_scores.len()
            ));
        };

        let mut stops = vec![Stop { spoke: first.spoke, cargo: first_cargo }];
        let mut scores = vec![first];

        let room = aircraft.capacity - first_cargo.total();
        if cfg.two_leg_routes && room > 0 {
            let hub_after = hub.map(|h| h.saturating_sub(first_cargo).0);
            let second_scores = score_candidates(
                NodeRef::Spoke(first.spoke),
                cfg.second_leg_multiplier,
                Some(first.spoke),
                pass,
                ctx,
                rng,
            );
            let second = ranked(&second_scores)
                .into_iter()
                .take_while(|s| s.total > cfg.second_leg_min_score)
                .find_map(|s| {
                    let cargo = plan_payload(pass.projected(s.spoke), &ctx.targets, pass.stage, room, hub_after);
                    (!cargo.is_empty()).then_some((s, cargo))
                });
            if let Some((second, cargo)) = second {
                stops.push(Stop { spoke: second.spoke, cargo });
                scores.push(second);
            }
        }

        debug!(
            aircraft = %aircraft.name,
            stage = %pass.stage,
            route = %RouteDisplay(&stops),
            score = first.total,
            "smart route"
        );
        Selection::Route { stops, scores }
    }
}

/// `S3[A2 B1] → S4[C1]` for log lines.
pub(crate) struct RouteDisplay<'a>(pub &'a [Stop]);

impl std::fmt::Display for RouteDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stop) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{}[{}]", NodeRef::Spoke(stop.spoke), CargoDisplay(stop.cargo))?;
        }
        Ok(())
    }
}

struct CargoDisplay(Stock);

impl std::fmt::Display for CargoDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (r, n) in self.0.iter().filter(|&(_, n)| n > 0) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{r}{n}")?;
            first = false;
        }
        Ok(())
    }
}
