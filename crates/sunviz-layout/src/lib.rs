#![forbid(unsafe_code)]

//! Radial geometry for the sunviz chart.
//!
//! Three stages over a `sunviz-core` hierarchy:
//!
//! - [`partition`] - angular spans and radial bands for every node
//!   ([`ArcRect`]), flat or zoomable.
//! - [`visibility`] - pure draw/label eligibility predicates over that
//!   geometry.
//! - [`ZoomState`] - the per-node current/target snapshots and the shared
//!   750 ms clock that animates focus changes.
//!
//! All time is caller-ticked `Duration`; nothing here reads a wall clock.

pub mod partition;
pub mod visibility;
pub mod zoom;

pub use partition::{ARC_PAD_CAP, ArcRect, LayoutMode, Partition, partition};
pub use visibility::{arc_visible, flat_label_visible, label_visible};
pub use zoom::{ZOOM_DURATION, ZoomState};
