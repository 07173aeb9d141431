//! hen-analysis: pinch-analysis targeting algorithms.
//!
//! The pipeline, in dependency order:
//! 1. `intervals`: global temperature-interval ladder
//! 2. `problem_table`: per-interval net heat and stream membership
//! 3. `cascade`: pinch location, utility targets, heat-flow table
//! 4. `partition`: above/below-pinch sub-problems + exchanger counts
//! 5. `composite`: hot/cold composite enthalpy curves
//! 6. `area`: vertical-border construction and minimum-area targeting
//!
//! Every result here is a pure function of the stream tables, the
//! minimum approach temperature and the film coefficients; nothing in
//! this crate holds mutable state.

pub mod area;
pub mod cascade;
pub mod composite;
pub mod intervals;
pub mod partition;
pub mod problem_table;

pub use area::{
    AREA_CORRECTION_FACTOR, Border, FlowPattern, Segment, area_target, build_borders,
    build_segments, log_mean_diff,
};
pub use cascade::{HeatFlow, PinchResult, heat_flows, locate_pinch};
pub use composite::{CompositeCurves, CompositePoint, build_composite_curves};
pub use intervals::{Ladder, build_ladder};
pub use partition::{
    Branch, Partition, PartitionStream, Partitions, minimum_exchangers, partition_streams,
};
pub use problem_table::{Interval, build_problem_table};
