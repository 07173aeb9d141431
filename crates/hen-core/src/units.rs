//! Display unit sets.
//!
//! The engine itself computes on one consistent scalar unit set; these
//! labels exist so frontends can annotate tables and plots. Two sets are
//! supported, matching the data the persisted files may carry.

use std::fmt;

/// Selectable display unit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitSet {
    #[default]
    Si,
    Us,
}

impl UnitSet {
    pub fn mass(&self) -> &'static str {
        match self {
            Self::Si => "kg",
            Self::Us => "lb",
        }
    }

    pub fn temperature(&self) -> &'static str {
        match self {
            Self::Si => "°C",
            Self::Us => "°F",
        }
    }

    pub fn area(&self) -> &'static str {
        match self {
            Self::Si => "m^2",
            Self::Us => "ft^2",
        }
    }

    pub fn energy(&self) -> &'static str {
        match self {
            Self::Si => "kJ",
            Self::Us => "BTU",
        }
    }

    pub fn time(&self) -> &'static str {
        match self {
            Self::Si => "s",
            Self::Us => "h",
        }
    }

    pub fn mass_flow(&self) -> String {
        format!("{}/{}", self.mass(), self.time())
    }

    pub fn energy_flow(&self) -> String {
        format!("{}/{}", self.energy(), self.time())
    }

    pub fn heat_capacity(&self) -> String {
        format!("{}/{}/{}", self.energy(), self.mass(), self.temperature())
    }

    /// Film heat transfer coefficient label.
    pub fn heat_coeff(&self) -> String {
        format!("{}/{}/{}", self.energy(), self.area(), self.temperature())
    }
}

impl fmt::Display for UnitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Si => write!(f, "SI"),
            Self::Us => write!(f, "US"),
        }
    }
}
