//! Project file schema.
//!
//! A flat document: the inputs (streams, films, ΔTmin) plus both
//! branch ledgers. Derived tables are never persisted; reloading
//! recomputes them from the inputs.

use hen_core::{FilmCoefficient, Real, Stream, UnitSet};
use hen_design::ExchangerRecord;
use serde::{Deserialize, Serialize};

/// Current schema version.
pub const LATEST_VERSION: u32 = 1;

/// The persisted exchanger ledgers, one list per pinch branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignsDef {
    #[serde(default)]
    pub above: Vec<ExchangerRecord>,
    #[serde(default)]
    pub below: Vec<ExchangerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub version: u32,
    #[serde(default)]
    pub units: UnitSet,
    /// Minimum approach temperature.
    pub dt: Real,
    pub hot: Vec<Stream>,
    pub cold: Vec<Stream>,
    #[serde(default)]
    pub hot_film: Vec<FilmCoefficient>,
    #[serde(default)]
    pub cold_film: Vec<FilmCoefficient>,
    #[serde(default)]
    pub designs: DesignsDef,
}

impl Project {
    /// A fresh document with the given inputs and unset films.
    pub fn new(dt: Real, hot: Vec<Stream>, cold: Vec<Stream>) -> Self {
        let hot_film = hot.iter().map(|s| FilmCoefficient::unset(&s.id)).collect();
        let cold_film = cold.iter().map(|s| FilmCoefficient::unset(&s.id)).collect();
        Self {
            version: LATEST_VERSION,
            units: UnitSet::default(),
            dt,
            hot,
            cold,
            hot_film,
            cold_film,
            designs: DesignsDef::default(),
        }
    }
}
