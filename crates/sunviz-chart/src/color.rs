#![forbid(unsafe_code)]

//! Node color resolution.
//!
//! Precedence, highest first: a color carried by the node itself (segment
//! metadata or cascading color list), an exact-name entry in the configured
//! override map, then the palette keyed by root wedge, parent, or own name
//! depending on the colormode.

use std::collections::HashMap;

use sunviz_core::{ChartConfig, ColorMode, Hierarchy, NodeId};

use crate::host::{ColorToken, Palette, ThemeKind};

/// The six-color categorical list the host ships by default.
pub const CATEGORICAL6: [&str; 6] = [
    "#006d9c", "#4fa484", "#ec9960", "#af575a", "#b6c75a", "#62b3b2",
];

/// d3's schemeCategory10, the default palette selector.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal scale: keys get colors in first-lookup order, cycling the list.
///
/// Assignments reset at every cycle boundary, so the mapping is stable for
/// the duration of a frame and reproducible across identical frames.
#[derive(Debug, Clone, Default)]
pub struct OrdinalPalette {
    assigned: HashMap<String, usize>,
}

impl OrdinalPalette {
    pub fn new() -> Self {
        Self::default()
    }

    fn list(selector: &str) -> &'static [&'static str] {
        match selector {
            "categorical" => &CATEGORICAL6,
            _ => &CATEGORY10,
        }
    }
}

impl Palette for OrdinalPalette {
    fn begin_cycle(&mut self, _theme: ThemeKind) {
        self.assigned.clear();
    }

    fn color_for(&mut self, key: &str, selector: &str) -> ColorToken {
        let next = self.assigned.len();
        let index = *self.assigned.entry(key.to_string()).or_insert(next);
        let list = Self::list(selector);
        list[index % list.len()].to_string()
    }
}

/// Resolve the fill color for `id`.
pub fn resolve_color(
    tree: &Hierarchy,
    id: NodeId,
    config: &ChartConfig,
    palette: &mut dyn Palette,
) -> ColorToken {
    let node = tree.node(id);
    if let Some(color) = &node.color {
        return color.clone();
    }
    if let Some(color) = config.color_override.get(&node.name) {
        return color.clone();
    }

    let key = match config.color_mode {
        ColorMode::Root => tree
            .ancestor_at_depth(id, 1)
            .map(|a| tree.node(a).name.clone())
            .unwrap_or_else(|| node.name.clone()),
        ColorMode::Parent => node
            .parent
            .map(|p| tree.node(p).name.clone())
            .unwrap_or_else(|| node.name.clone()),
        ColorMode::Own => node.name.clone(),
    };
    palette.color_for(&key, &config.palette)
}
