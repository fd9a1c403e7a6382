//! Named, pre-built configurations for batch and comparison runs.

use std::fmt;
use std::str::FromStr;

use al_core::{AircraftSpec, AirliftConfig, Stock};

use crate::SimError;

/// A preset selected by name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Scenario {
    /// Two C-130s on the default ring.
    TwoC130,
    /// Four C-130s.
    FourC130,
    /// Two C-130s and two C-27s.
    MixedFleet,
    /// Two C-130s; every spoke starts empty.
    Starved,
    /// Two C-130s; every spoke starts at its target stock.
    ///
    /// Only a dispatch pass run before any operation sees a fully stocked
    /// network. A full tick runs operations first, so C and D fall below
    /// target and the first pass already assigns top-up sorties.
    Stocked,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::TwoC130,
        Scenario::FourC130,
        Scenario::MixedFleet,
        Scenario::Starved,
        Scenario::Stocked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::TwoC130 => "2xC130",
            Scenario::FourC130 => "4xC130",
            Scenario::MixedFleet => "2xC130_2xC27",
            Scenario::Starved => "starved",
            Scenario::Stocked => "stocked",
        }
    }

    /// The full configuration for this preset.
    pub fn config(self) -> AirliftConfig {
        let mut config = AirliftConfig::default();
        match self {
            Scenario::TwoC130 => {}
            Scenario::FourC130 => config.fleet = vec![AircraftSpec::c130(4)],
            Scenario::MixedFleet => config.fleet = vec![AircraftSpec::c130(2), AircraftSpec::c27(2)],
            Scenario::Starved => config.initial_stock = Stock::ZERO,
            Scenario::Stocked => config.initial_stock = config.resource_targets().0,
        }
        config
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    /// Case-insensitive lookup by [`Scenario::name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownScenario(s.to_string()))
    }
}
