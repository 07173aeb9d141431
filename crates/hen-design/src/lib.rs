//! hen-design: exchanger sizing, costing, economic optimization and the
//! incremental network-design ledger.
//!
//! `hen-analysis` targets the network in aggregate; this crate turns
//! those targets into equipment. `exchanger` sizes a single unit,
//! `cost` prices it from the correlation tables, `eaoc` sweeps the
//! approach temperature for the economic optimum, and `ledger` tracks
//! a concrete design one exchanger at a time against the targets.

pub mod cost;
pub mod eaoc;
pub mod exchanger;
pub mod ledger;

pub use cost::{
    Arrangement, CostCorrelation, ExchangerKind, Material, PressureBracket, bare_module_cost,
    material_factor, pressure_factor, purchase_cost,
};
pub use eaoc::{CostBasis, SweepPoint, eaoc_at, sweep};
pub use exchanger::{exchanger_area, overall_coefficient, shell_count};
pub use ledger::{BranchDesign, ExchangerRecord, ExchangerSpec, UtilitySide, split_stream};
