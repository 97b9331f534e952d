#![forbid(unsafe_code)]

//! Data model and aggregation for the sunviz radial chart.
//!
//! This crate turns an ordered tabular result set into the in-memory
//! hierarchy the layout engine consumes:
//!
//! - [`Dataset`] - field names plus row-major cells, caller-ordered.
//! - [`ChartConfig`] - typed options parsed from host key/value pairs.
//! - [`aggregate`] - the row-to-hierarchy walk: prefix merging, per-segment
//!   metadata, cascading colors, drilldown snapshots, and the terminal
//!   error thresholds.
//! - [`drilldown_payload`] - the field/value pairs emitted when a node is
//!   activated.
//!
//! Everything here is pure data transformation; rendering, palettes, and
//! timers live upstream in `sunviz-layout` and `sunviz-chart`.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod drilldown;
pub mod tree;

pub use aggregate::{Aggregate, AggregateError, Diagnostics, aggregate};
pub use config::{ChartConfig, ChartMode, ColorMode};
pub use dataset::{COLOR_FIELD, Cell, Dataset, is_blank};
pub use drilldown::drilldown_payload;
pub use tree::{Hierarchy, Node, NodeId, NodeKind};
