#![forbid(unsafe_code)]

//! The chart controller.
//!
//! Owns the cross-cycle state (dataset, config, measured size, focus) and
//! runs the per-cycle pipeline: aggregate, partition, render. Data, config,
//! and resize updates arm a shared trailing-edge debounce; [`SunburstChart::tick`]
//! advances that timer plus any zoom animation and redraws as needed. A
//! draw that finds no measured area is a silent no-op, retried on the next
//! trigger; a failed aggregation replaces the chart with its diagnostic
//! message and hint.

use std::f64::consts::TAU;
use std::time::Duration;

use sunviz_core::{
    Aggregate, ChartConfig, Dataset, Diagnostics, Hierarchy, NodeId, aggregate, drilldown_payload,
};
use sunviz_layout::partition::{ARC_PAD_CAP, ArcRect, LayoutMode, Partition, partition};
use sunviz_layout::visibility::{arc_visible, flat_label_visible, label_visible};
use sunviz_layout::zoom::ZoomState;

use crate::color::{OrdinalPalette, resolve_color};
use crate::debounce::{Debounce, REDRAW_DELAY};
use crate::host::{DiscardSink, DrilldownSink, Palette, ThemeKind, ThemeSource};
use crate::label::truncate_label;
use crate::surface::{ArcPrimitive, Surface, TextPrimitive};

/// Arc fill opacity for branch nodes.
const BRANCH_OPACITY: f64 = 1.0;
/// Arc fill opacity for leaf nodes in zoomable mode.
const LEAF_OPACITY: f64 = 0.8;

/// What lies under a surface coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A drawn arc.
    Arc(NodeId),
    /// The zoomable center circle (click to ascend).
    Hub,
    Miss,
}

/// Hover payload: the ancestor trail (breadcrumbs), the node's own tooltip
/// metadata, and its measured share.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    /// Names from the outermost real ancestor down to the node itself.
    pub path: Vec<String>,
    /// Segment tooltip metadata, when the data carried any.
    pub note: Option<String>,
    /// Effective (subtree) value.
    pub value: f64,
    /// Share of the chart total, rounded to two decimals.
    pub percent: f64,
}

/// One draw cycle's retained output, kept for hit testing and transition
/// frames until the next rebuild.
struct Scene {
    data: Dataset,
    tree: Hierarchy,
    diagnostics: Diagnostics,
    layout: Partition,
    zoom: Option<ZoomState>,
    center: (f64, f64),
    /// Pixels per radial unit: one depth band in zoomable mode, one pixel
    /// in flat mode (bands are already pixel-sized there).
    unit: f64,
}

impl Scene {
    fn rect(&self, id: NodeId) -> ArcRect {
        match &self.zoom {
            Some(zoom) => zoom.current(id),
            None => self.layout.arc(id),
        }
    }
}

/// Radial hierarchy chart over an injected drawing surface.
pub struct SunburstChart {
    config: ChartConfig,
    data: Option<Dataset>,
    size: Option<(f64, f64)>,
    debounce: Debounce,
    palette: Box<dyn Palette>,
    theme: Box<dyn ThemeSource>,
    sink: Box<dyn DrilldownSink>,
    scene: Option<Scene>,
}

impl SunburstChart {
    pub fn new(
        palette: Box<dyn Palette>,
        theme: Box<dyn ThemeSource>,
        sink: Box<dyn DrilldownSink>,
    ) -> Self {
        Self {
            config: ChartConfig::default(),
            data: None,
            size: None,
            debounce: Debounce::new(REDRAW_DELAY),
            palette,
            theme,
            sink,
            scene: None,
        }
    }

    /// Built-in ordinal palette, light theme, discarded drilldowns.
    pub fn with_defaults() -> Self {
        Self::new(
            Box::new(OrdinalPalette::new()),
            Box::new(ThemeKind::Light),
            Box::new(DiscardSink),
        )
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Replace the dataset and schedule a redraw.
    pub fn update_data(&mut self, data: Dataset) {
        self.data = Some(data);
        self.debounce.trigger();
    }

    /// Replace the configuration and schedule a redraw.
    pub fn update_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.debounce.trigger();
    }

    /// Record the measured drawing area and schedule a redraw.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
        self.debounce.trigger();
    }

    /// Mark the render target as detached. Draws silently defer until the
    /// next `resize`.
    pub fn detach(&mut self) {
        self.size = None;
    }

    /// Currently focused node in zoomable mode.
    pub fn focus(&self) -> Option<NodeId> {
        self.scene.as_ref()?.zoom.as_ref().map(|z| z.focus())
    }

    /// True while a zoom animation is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.scene
            .as_ref()
            .and_then(|s| s.zoom.as_ref())
            .is_some_and(|z| z.is_transitioning())
    }

    /// Diagnostics from the last successful draw.
    pub fn diagnostics(&self) -> Option<Diagnostics> {
        self.scene.as_ref().map(|s| s.diagnostics)
    }

    /// Advance all timers by `dt`, redrawing onto `surface` when the
    /// debounce expires or a zoom transition moves geometry.
    pub fn tick(&mut self, dt: Duration, surface: &mut dyn Surface) {
        if self.debounce.tick(dt) {
            self.draw(surface);
        }
        let moved = match &mut self.scene {
            Some(scene) => scene.zoom.as_mut().is_some_and(|z| z.tick(dt)),
            None => false,
        };
        if moved {
            self.render_scene(surface);
        }
    }

    /// Route a click at surface coordinates.
    pub fn handle_click(&mut self, x: f64, y: f64) {
        let target = self.hit_test(x, y);
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        match (target, &mut scene.zoom) {
            (HitTarget::Hub, Some(zoom)) => {
                if zoom.ascend(&scene.tree) {
                    tracing::debug!(focus = ?zoom.focus(), "zoom ascend");
                }
            }
            (HitTarget::Arc(id), Some(zoom)) => {
                if scene.tree.node(id).is_branch() {
                    tracing::debug!(node = %scene.tree.node(id).name, "zoom to branch");
                    zoom.zoom_to(id);
                }
            }
            (HitTarget::Arc(id), None) => {
                if self.config.mode.emits_drilldown() {
                    let payload =
                        drilldown_payload(&scene.data, &scene.tree, id, &self.config.null_token);
                    tracing::debug!(fields = payload.len(), "drilldown emitted");
                    self.sink.emit(&payload);
                }
            }
            _ => {}
        }
    }

    /// Tooltip content for a hover position, if it lands on an arc.
    pub fn hover(&self, x: f64, y: f64) -> Option<TooltipContent> {
        match self.hit_test(x, y) {
            HitTarget::Arc(id) => self.tooltip_for(id),
            _ => None,
        }
    }

    /// Tooltip content for a node of the current scene.
    pub fn tooltip_for(&self, id: NodeId) -> Option<TooltipContent> {
        let scene = self.scene.as_ref()?;
        if id == scene.tree.root() {
            return None;
        }
        let node = scene.tree.node(id);

        let mut path: Vec<String> = scene
            .tree
            .ancestors(id)
            .map(|a| scene.tree.node(a).name.clone())
            .collect();
        path.reverse();
        path.remove(0); // synthetic root is not part of the trail
        path.push(node.name.clone());

        let value = scene.layout.value(id);
        let total = scene.diagnostics.total;
        let percent = if total > 0.0 {
            (value / total * 10000.0).round() / 100.0
        } else {
            0.0
        };
        Some(TooltipContent {
            path,
            note: node.tooltip.clone(),
            value,
            percent,
        })
    }

    /// Resolve a surface coordinate against the current geometry.
    pub fn hit_test(&self, x: f64, y: f64) -> HitTarget {
        let Some(scene) = self.scene.as_ref() else {
            return HitTarget::Miss;
        };
        let (cx, cy) = scene.center;
        let dx = x - cx;
        let dy = y - cy;
        let radius = (dx * dx + dy * dy).sqrt();
        // Angle clockwise from 12 o'clock, matching arc geometry.
        let mut angle = dx.atan2(-dy);
        if angle < 0.0 {
            angle += TAU;
        }

        if let Some(zoom) = &scene.zoom {
            if radius <= scene.unit {
                return HitTarget::Hub;
            }
            for id in scene.tree.ids() {
                if id == scene.tree.root() {
                    continue;
                }
                let rect = zoom.current(id);
                if !arc_visible(&rect) {
                    continue;
                }
                if angle >= rect.x0
                    && angle < rect.x1
                    && radius >= rect.y0 * scene.unit
                    && radius < rect.y1 * scene.unit
                {
                    return HitTarget::Arc(id);
                }
            }
        } else {
            for id in scene.tree.ids() {
                if id == scene.tree.root() {
                    continue;
                }
                let rect = scene.layout.arc(id);
                if angle >= rect.x0 && angle < rect.x1 && radius >= rect.y0 && radius < rect.y1 {
                    return HitTarget::Arc(id);
                }
            }
        }
        HitTarget::Miss
    }

    /// Rebuild the scene from the current dataset and render it.
    fn draw(&mut self, surface: &mut dyn Surface) {
        let Some((width, height)) = self.size else {
            return;
        };
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let Some(data) = self.data.clone() else {
            return;
        };

        if self.config.color_override_malformed {
            tracing::warn!("coloroverride option did not parse; using no overrides");
        }

        match aggregate(&data, &self.config) {
            Err(err) => {
                tracing::warn!(kind = err.kind(), "draw aborted: {err}");
                surface.clear();
                surface.show_message(&err.to_string(), err.hint());
                self.scene = None;
            }
            Ok(Aggregate { tree, diagnostics }) => {
                if diagnostics.skipped_rows > 0 {
                    tracing::warn!(
                        skipped = diagnostics.skipped_rows,
                        "rows skipped: measure cell not numeric"
                    );
                }
                tracing::debug!(
                    rows = diagnostics.valid_rows,
                    nodes = tree.len(),
                    mode = ?self.config.mode,
                    "chart rebuilt"
                );

                let size = width.min(height);
                let (layout, zoom, unit) = if self.config.mode.is_flat() {
                    let radius = size / 2.0;
                    (partition(&tree, LayoutMode::Flat { radius }), None, 1.0)
                } else {
                    let layout = partition(&tree, LayoutMode::Zoomable);
                    let zoom = ZoomState::new(&tree, &layout);
                    (layout, Some(zoom), size / 6.0)
                };
                self.scene = Some(Scene {
                    data,
                    tree,
                    diagnostics,
                    layout,
                    zoom,
                    center: (width / 2.0, height / 2.0),
                    unit,
                });
                self.render_scene(surface);
            }
        }
    }

    /// Emit one frame of the current scene.
    fn render_scene(&mut self, surface: &mut dyn Surface) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        surface.clear();
        self.palette.begin_cycle(self.theme.current_theme());

        let (cx, cy) = scene.center;
        let font_px = self.config.font_px();
        let zoomable = scene.zoom.is_some();

        for id in scene.tree.ids() {
            if id == scene.tree.root() {
                continue;
            }
            let rect = scene.rect(id);
            let visible = if zoomable {
                arc_visible(&rect)
            } else {
                rect.x1 > rect.x0
            };
            if !visible {
                continue;
            }

            let opacity = if zoomable && scene.tree.node(id).is_leaf() {
                LEAF_OPACITY
            } else {
                BRANCH_OPACITY
            };
            let padded = rect.padded(ARC_PAD_CAP);
            let inner = rect.y0 * scene.unit;
            let outer = (rect.y1 * scene.unit - 1.0).max(inner);
            let fill = resolve_color(&scene.tree, id, &self.config, self.palette.as_mut());
            surface.fill_arc(ArcPrimitive {
                cx,
                cy,
                start_angle: padded.x0,
                end_angle: padded.x1,
                inner_radius: inner,
                outer_radius: outer,
                fill,
                opacity,
            });
        }

        if !self.config.show_labels {
            return;
        }
        for id in scene.tree.ids() {
            if id == scene.tree.root() {
                continue;
            }
            let rect = scene.rect(id);
            let labeled = if zoomable {
                label_visible(&rect)
            } else {
                flat_label_visible(&rect)
            };
            if !labeled {
                continue;
            }

            let angle_deg = rect.mid_angle().to_degrees();
            surface.draw_text(TextPrimitive {
                cx,
                cy,
                rotate: angle_deg - 90.0,
                radial_offset: rect.mid_radius() * scene.unit,
                flip: angle_deg >= 180.0,
                text: truncate_label(
                    &scene.tree.node(id).name,
                    self.config.label_width,
                    font_px,
                ),
                color: self.config.label_color.clone(),
                size: font_px,
                opacity: 1.0,
            });
        }
    }
}

impl Default for SunburstChart {
    fn default() -> Self {
        Self::with_defaults()
    }
}
