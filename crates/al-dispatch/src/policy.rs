//! The `TargetingPolicy` trait: the seam between the engine and the two
//! route selectors.

use al_core::SimRng;
use al_fleet::{Aircraft, Stop};

use crate::{DispatchContext, PassState, SpokeScore};

/// What a policy decided for one idle aircraft.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// Fly these stops (one or two, non-empty cargo each).
    Route {
        stops:  Vec<Stop>,
        /// Score of each chosen stop, when the policy scores.
        scores: Vec<SpokeScore>,
    },
    /// Nothing needs delivering, or the finite hub has nothing the
    /// needy spokes lack; stay idle.
    Idle,
    /// Spokes need cargo but no valid route could be produced.
    Unresolved(String),
}

/// Route selection for a single idle aircraft.
///
/// Policies read the world through [`DispatchContext`] and the pass scratch
/// state; they never mutate the ledger or fleet.  The engine commits the
/// returned route (reservations, fairness, projected stock) before asking
/// about the next aircraft.
pub trait TargetingPolicy: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Called once at the start of every pass.  Default: nothing.
    fn begin_period(&mut self) {}

    fn select(
        &mut self,
        aircraft: &Aircraft,
        pass:     &PassState,
        ctx:      &DispatchContext<'_>,
        rng:      &mut SimRng,
    ) -> Selection;
}
