#![forbid(unsafe_code)]

//! Radial partition layout.
//!
//! Assigns every node an [`ArcRect`]: an angular span in radians plus a
//! radial band. Sibling order is a stable descending sort by subtree value,
//! so equal datasets always produce identical angular placement.

use std::f64::consts::TAU;

use sunviz_core::{Hierarchy, NodeId};

/// Cap on the angular gap inserted between adjacent arcs, in radians.
pub const ARC_PAD_CAP: f64 = 0.005;

/// Angular span plus radial band for one node.
///
/// `x0`/`x1` are radians in `[0, 2π)`. `y0`/`y1` are pixels from the origin
/// in flat layout and depth units in zoomable layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArcRect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl ArcRect {
    pub const ZERO: Self = Self {
        x0: 0.0,
        x1: 0.0,
        y0: 0.0,
        y1: 0.0,
    };

    /// Angular width in radians.
    #[inline]
    pub fn angular_width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Radial band height.
    #[inline]
    pub fn radial_width(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Midpoint angle.
    #[inline]
    pub fn mid_angle(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    /// Midpoint radius.
    #[inline]
    pub fn mid_radius(&self) -> f64 {
        (self.y0 + self.y1) / 2.0
    }

    /// Linear interpolation toward `other` at `t` in `[0, 1]`.
    pub fn lerp(&self, other: &ArcRect, t: f64) -> ArcRect {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: f64, b: f64| a + (b - a) * t;
        ArcRect {
            x0: mix(self.x0, other.x0),
            x1: mix(self.x1, other.x1),
            y0: mix(self.y0, other.y0),
            y1: mix(self.y1, other.y1),
        }
    }

    /// Angular span shrunk by the inter-arc gap: `min(width / 2, cap)`
    /// split evenly between both sides. A degenerate arc can therefore
    /// never swallow its neighbors' padding.
    pub fn padded(&self, cap: f64) -> ArcRect {
        let pad = (self.angular_width() / 2.0).min(cap);
        ArcRect {
            x0: self.x0 + pad / 2.0,
            x1: self.x1 - pad / 2.0,
            ..*self
        }
    }
}

/// Radial band scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutMode {
    /// Fixed-width rings from the origin out to `radius` pixels.
    Flat { radius: f64 },
    /// Unit-depth bands, rescaled later by the zoom focus window.
    Zoomable,
}

/// Geometry overlay for a [`Hierarchy`], indexed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct Partition {
    arcs: Vec<ArcRect>,
    values: Vec<f64>,
    depths: Vec<usize>,
    max_depth: usize,
}

impl Partition {
    pub fn arc(&self, id: NodeId) -> ArcRect {
        self.arcs[id.index()]
    }

    /// Subtree value (sum of descendant leaves, plus the node's own value
    /// for leaves).
    pub fn value(&self, id: NodeId) -> f64 {
        self.values[id.index()]
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.depths[id.index()]
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

/// Compute geometry for every node of `tree`.
pub fn partition(tree: &Hierarchy, mode: LayoutMode) -> Partition {
    let len = tree.len();
    let max_depth = tree.max_depth();
    let band = match mode {
        // The original partitions [0, radius] into max_depth + 1 equal
        // rings, root ring included.
        LayoutMode::Flat { radius } => radius / (max_depth as f64 + 1.0),
        LayoutMode::Zoomable => 1.0,
    };

    let mut values = vec![0.0; len];
    let mut depths = vec![0; len];
    for id in tree.ids() {
        depths[id.index()] = tree.node(id).depth;
        if let Some(v) = tree.node(id).value() {
            values[id.index()] = v;
        }
    }
    // Creation order puts parents before children, so a reverse walk sums
    // each subtree before folding it into its parent.
    for id in tree.ids().rev() {
        if let Some(parent) = tree.node(id).parent {
            let subtree = values[id.index()];
            values[parent.index()] += subtree;
        }
    }

    let mut arcs = vec![ArcRect::ZERO; len];
    arcs[tree.root().index()] = ArcRect {
        x0: 0.0,
        x1: TAU,
        y0: 0.0,
        y1: band,
    };

    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let parent_arc = arcs[id.index()];
        let parent_value = values[id.index()];

        let mut order: Vec<NodeId> = tree.node(id).children().to_vec();
        order.sort_by(|&a, &b| {
            values[b.index()]
                .partial_cmp(&values[a.index()])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut cursor = parent_arc.x0;
        for child in order {
            let fraction = if parent_value > 0.0 {
                values[child.index()] / parent_value
            } else {
                0.0
            };
            let span = parent_arc.angular_width() * fraction;
            let depth = depths[child.index()] as f64;
            arcs[child.index()] = ArcRect {
                x0: cursor,
                x1: cursor + span,
                y0: depth * band,
                y1: (depth + 1.0) * band,
            };
            cursor += span;
            stack.push(child);
        }
    }

    Partition {
        arcs,
        values,
        depths,
        max_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunviz_core::{ChartConfig, Dataset, aggregate};

    fn tree_from(rows: &[&[&str]]) -> Hierarchy {
        let width = rows[0].len();
        let fields: Vec<String> = (0..width - 1)
            .map(|i| format!("l{i}"))
            .chain(std::iter::once("count".to_string()))
            .collect();
        let mut data = Dataset::new(fields);
        for r in rows {
            data.push_row(r.iter().map(|c| Some((*c).to_string())).collect());
        }
        aggregate(&data, &ChartConfig::default()).unwrap().tree
    }

    #[test]
    fn root_spans_full_circle() {
        let tree = tree_from(&[&["A", "1"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);
        let root = layout.arc(tree.root());
        assert_eq!(root.x0, 0.0);
        assert_eq!(root.x1, TAU);
        assert_eq!(root.y0, 0.0);
        assert_eq!(root.y1, 1.0);
    }

    #[test]
    fn spans_are_proportional_to_values() {
        let tree = tree_from(&[&["A", "3"], &["B", "1"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);

        let a = tree.node(tree.root()).children()[0];
        let b = tree.node(tree.root()).children()[1];
        assert!((layout.arc(a).angular_width() - TAU * 0.75).abs() < 1e-12);
        assert!((layout.arc(b).angular_width() - TAU * 0.25).abs() < 1e-12);
    }

    #[test]
    fn larger_sibling_is_placed_first() {
        let tree = tree_from(&[&["small", "1"], &["big", "9"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);

        let small = tree.node(tree.root()).children()[0];
        let big = tree.node(tree.root()).children()[1];
        assert_eq!(layout.arc(big).x0, 0.0);
        assert!(layout.arc(small).x0 > layout.arc(big).x0);
    }

    #[test]
    fn equal_siblings_keep_insertion_order() {
        let tree = tree_from(&[&["first", "2"], &["second", "2"], &["third", "2"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);

        let children = tree.node(tree.root()).children();
        assert_eq!(layout.arc(children[0]).x0, 0.0);
        assert!(layout.arc(children[1]).x0 < layout.arc(children[2]).x0);
    }

    #[test]
    fn sibling_spans_fill_the_parent() {
        let tree = tree_from(&[
            &["A", "B", "5"],
            &["A", "C", "7"],
            &["D", "E", "4"],
        ]);
        let layout = partition(&tree, LayoutMode::Zoomable);

        let a = tree.branch_child(tree.root(), "A").unwrap();
        let span: f64 = tree
            .node(a)
            .children()
            .iter()
            .map(|&c| layout.arc(c).angular_width())
            .sum();
        assert!((span - layout.arc(a).angular_width()).abs() < 1e-12);
    }

    #[test]
    fn zoomable_bands_are_unit_depths() {
        let tree = tree_from(&[&["A", "B", "5"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);

        let a = tree.branch_child(tree.root(), "A").unwrap();
        let leaf = tree.node(a).children()[0];
        assert_eq!(layout.arc(a).y0, 1.0);
        assert_eq!(layout.arc(a).y1, 2.0);
        assert_eq!(layout.arc(leaf).y0, 2.0);
        assert_eq!(layout.arc(leaf).y1, 3.0);
    }

    #[test]
    fn flat_bands_split_the_radius() {
        let tree = tree_from(&[&["A", "B", "5"]]);
        let layout = partition(&tree, LayoutMode::Flat { radius: 300.0 });

        // Depths 0..=2 share 300px: 100px rings.
        let a = tree.branch_child(tree.root(), "A").unwrap();
        let leaf = tree.node(a).children()[0];
        assert_eq!(layout.arc(a).y0, 100.0);
        assert_eq!(layout.arc(a).y1, 200.0);
        assert_eq!(layout.arc(leaf).y1, 300.0);
    }

    #[test]
    fn branch_value_sums_descendants() {
        let tree = tree_from(&[&["A", "B", "5"], &["A", "C", "7"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);
        let a = tree.branch_child(tree.root(), "A").unwrap();
        assert_eq!(layout.value(a), 12.0);
        assert_eq!(layout.value(tree.root()), 12.0);
    }

    #[test]
    fn zero_valued_parent_collapses_children() {
        let tree = tree_from(&[&["A", "B", "0"], &["C", "", "2"]]);
        let layout = partition(&tree, LayoutMode::Zoomable);
        let a = tree.branch_child(tree.root(), "A").unwrap();
        let b = tree.node(a).children()[0];
        assert_eq!(layout.arc(a).angular_width(), 0.0);
        assert_eq!(layout.arc(b).angular_width(), 0.0);
    }

    // ---- ArcRect helpers ----

    #[test]
    fn padding_is_capped() {
        let wide = ArcRect {
            x0: 0.0,
            x1: 1.0,
            y0: 0.0,
            y1: 1.0,
        };
        let padded = wide.padded(ARC_PAD_CAP);
        assert!((padded.x0 - ARC_PAD_CAP / 2.0).abs() < 1e-12);
        assert!((padded.x1 - (1.0 - ARC_PAD_CAP / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn padding_never_exceeds_half_width() {
        let sliver = ArcRect {
            x0: 0.0,
            x1: 0.004,
            y0: 0.0,
            y1: 1.0,
        };
        let padded = sliver.padded(ARC_PAD_CAP);
        // Gap is width/2 = 0.002, so the arc keeps half its width.
        assert!((padded.angular_width() - 0.002).abs() < 1e-12);
        assert!(padded.x1 > padded.x0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = ArcRect {
            x0: 0.0,
            x1: 1.0,
            y0: 0.0,
            y1: 1.0,
        };
        let b = ArcRect {
            x0: 2.0,
            x1: 4.0,
            y0: 1.0,
            y1: 3.0,
        };
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.x0, 1.0);
        assert_eq!(mid.x1, 2.5);
        assert_eq!(mid.y0, 0.5);
        assert_eq!(mid.y1, 2.0);
    }
}
