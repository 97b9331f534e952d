#![forbid(unsafe_code)]

//! Draw and label eligibility predicates.
//!
//! Zoomable geometry is normalized to depth units relative to the focused
//! node, so the same window applies before, during, and after a zoom: the
//! hub occupies `[0, 1)` and the two rings `[1, 3)` are drawable. During a
//! transition these predicates run against each node's `current` rectangle
//! (arcs stay visible mid-flight) and against `target` for the end-state
//! opacity.

use crate::partition::ArcRect;

/// Outer edge of the zoomable focus window, in depth units.
pub const FOCUS_WINDOW_OUTER: f64 = 3.0;

/// Inner edge of the zoomable focus window; bands below it form the hub.
pub const FOCUS_WINDOW_INNER: f64 = 1.0;

/// Minimum normalized area (radians times depth units) for a zoomable
/// label to stay legible.
pub const MIN_LABEL_AREA: f64 = 0.03;

/// Minimum arc-length proxy (mid radius times angular width, pixel units)
/// for a flat-mode label.
pub const FLAT_MIN_LABEL_EXTENT: f64 = 10.0;

/// Whether an arc falls inside the focus window with nonzero width.
pub fn arc_visible(rect: &ArcRect) -> bool {
    rect.y1 <= FOCUS_WINDOW_OUTER && rect.y0 >= FOCUS_WINDOW_INNER && rect.x1 > rect.x0
}

/// Whether an arc's label fits legibly: drawable arc plus enough area.
pub fn label_visible(rect: &ArcRect) -> bool {
    arc_visible(rect) && rect.radial_width() * rect.angular_width() > MIN_LABEL_AREA
}

/// Flat-mode label eligibility (flat arcs themselves are always drawn).
pub fn flat_label_visible(rect: &ArcRect) -> bool {
    rect.mid_radius() * rect.angular_width() > FLAT_MIN_LABEL_EXTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, x1: f64, y0: f64, y1: f64) -> ArcRect {
        ArcRect { x0, x1, y0, y1 }
    }

    #[test]
    fn hub_band_is_not_drawable() {
        assert!(!arc_visible(&rect(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn first_two_rings_are_drawable() {
        assert!(arc_visible(&rect(0.0, 1.0, 1.0, 2.0)));
        assert!(arc_visible(&rect(0.0, 1.0, 2.0, 3.0)));
    }

    #[test]
    fn outside_window_is_not_drawable() {
        assert!(!arc_visible(&rect(0.0, 1.0, 3.0, 4.0)));
        // Straddling the outer edge fails too.
        assert!(!arc_visible(&rect(0.0, 1.0, 2.5, 3.5)));
    }

    #[test]
    fn zero_width_arc_is_not_drawable() {
        assert!(!arc_visible(&rect(1.0, 1.0, 1.0, 2.0)));
    }

    #[test]
    fn label_needs_area_beyond_visibility() {
        let thin = rect(0.0, 0.02, 1.0, 2.0);
        assert!(arc_visible(&thin));
        assert!(!label_visible(&thin));

        let wide = rect(0.0, 0.5, 1.0, 2.0);
        assert!(label_visible(&wide));
    }

    #[test]
    fn label_area_boundary_is_exclusive() {
        // Area exactly at the floor stays hidden.
        let edge = rect(0.0, MIN_LABEL_AREA, 1.0, 2.0);
        assert!(!label_visible(&edge));
    }

    #[test]
    fn flat_labels_need_arc_extent() {
        // Mid radius 100, width 0.2 rad: extent 20.
        assert!(flat_label_visible(&rect(0.0, 0.2, 50.0, 150.0)));
        // Mid radius 25, width 0.2 rad: extent 5.
        assert!(!flat_label_visible(&rect(0.0, 0.2, 0.0, 50.0)));
    }
}
