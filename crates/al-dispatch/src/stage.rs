//! Network-wide dispatch stage.

use std::fmt;

use al_core::Resource;
use al_ledger::ResourceLedger;

/// Which resource the whole network is short of first.
///
/// Stage is a simulation-wide policy evaluated once per dispatch pass, not
/// per aircraft.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Some active spoke has no A.
    APriming,
    /// Every active spoke has A, but some has no B.
    BPriming,
    /// A and B are present everywhere; push C and D for operations.
    Ops,
}

impl Stage {
    pub fn detect(ledger: &ResourceLedger) -> Stage {
        let active = || ledger.spokes().iter().filter(|s| s.active);
        if active().any(|s| s.stock[Resource::A] == 0) {
            Stage::APriming
        } else if active().any(|s| s.stock[Resource::B] == 0) {
            Stage::BPriming
        } else {
            Stage::Ops
        }
    }

    /// Order in which the payload planner fills deficits.
    pub fn priority(self) -> [Resource; 4] {
        use Resource::*;
        match self {
            Stage::APriming => [A, B, C, D],
            Stage::BPriming => [B, A, C, D],
            Stage::Ops => [C, D, A, B],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::APriming => "A",
            Stage::BPriming => "B",
            Stage::Ops => "OPS",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
