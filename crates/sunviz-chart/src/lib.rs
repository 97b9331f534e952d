#![forbid(unsafe_code)]

//! Chart controller and rendering surface for the sunviz radial chart.
//!
//! Wires the `sunviz-core` aggregator and `sunviz-layout` geometry to a
//! host environment injected through capability traits: a [`Palette`], a
//! [`ThemeSource`], a [`DrilldownSink`], and the [`Surface`] that receives
//! primitive draw instructions.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use sunviz_chart::{REDRAW_DELAY, RecordingSurface, SunburstChart};
//! use sunviz_core::{ChartConfig, Dataset};
//!
//! let mut chart = SunburstChart::with_defaults();
//! chart.update_config(ChartConfig::from_options([("mode", "zoomable")]));
//! chart.update_data(dataset);
//! chart.resize(800.0, 600.0);
//!
//! let mut surface = RecordingSurface::new();
//! chart.tick(REDRAW_DELAY, &mut surface);   // debounce expires, chart draws
//! chart.handle_click(x, y);                 // focus a wedge
//! chart.tick(Duration::from_millis(16), &mut surface); // animation frame
//! ```

pub mod chart;
pub mod color;
pub mod debounce;
pub mod host;
pub mod label;
pub mod surface;

pub use chart::{HitTarget, SunburstChart, TooltipContent};
pub use color::{CATEGORICAL6, CATEGORY10, OrdinalPalette, resolve_color};
pub use debounce::{Debounce, REDRAW_DELAY};
pub use host::{ColorToken, DiscardSink, DrilldownSink, Palette, ThemeKind, ThemeSource};
pub use label::truncate_label;
pub use surface::{ArcPrimitive, DrawOp, RecordingSurface, Surface, TextPrimitive};
