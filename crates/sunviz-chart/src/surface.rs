#![forbid(unsafe_code)]

//! Draw-instruction surface abstraction.
//!
//! The chart emits primitive instructions (filled arcs, rotated radial
//! text, a diagnostic message) against a [`Surface`]; the concrete backend
//! (SVG, canvas, terminal cells) lives with the host. Angles follow the
//! chart convention: radians measured clockwise from 12 o'clock.

use crate::host::ColorToken;

/// A filled annular sector.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPrimitive {
    /// Chart center in surface coordinates.
    pub cx: f64,
    pub cy: f64,
    /// Angular span, radians clockwise from 12 o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Radial band in surface pixels.
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: ColorToken,
    /// 0.0 (skip) to 1.0 (opaque).
    pub opacity: f64,
}

/// A label positioned along a ray from the chart center.
///
/// Placement mirrors the rotate/translate/rotate transform chain: rotate by
/// `rotate` degrees, advance `radial_offset` pixels, then flip 180 degrees
/// when `flip` so left-half labels still read left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub cx: f64,
    pub cy: f64,
    /// Degrees, first rotation of the transform chain.
    pub rotate: f64,
    /// Distance from center along the rotated axis, pixels.
    pub radial_offset: f64,
    /// Extra 180 degree rotation for the left half of the circle.
    pub flip: bool,
    /// Already truncated to the configured label width.
    pub text: String,
    pub color: ColorToken,
    /// Font size in pixels.
    pub size: f64,
    pub opacity: f64,
}

/// Abstract 2D drawing target supplied by the host.
pub trait Surface {
    /// Drop everything previously drawn.
    fn clear(&mut self);

    fn fill_arc(&mut self, arc: ArcPrimitive);

    fn draw_text(&mut self, text: TextPrimitive);

    /// Replace the chart with a diagnostic message and hint.
    fn show_message(&mut self, message: &str, hint: &str);
}

/// One recorded drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Arc(ArcPrimitive),
    Text(TextPrimitive),
    Message { message: String, hint: String },
}

/// Surface that records instructions instead of drawing, for tests and
/// headless inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arcs recorded since the last clear.
    pub fn arcs(&self) -> Vec<&ArcPrimitive> {
        self.frame_ops()
            .filter_map(|op| match op {
                DrawOp::Arc(arc) => Some(arc),
                _ => None,
            })
            .collect()
    }

    /// Labels recorded since the last clear.
    pub fn texts(&self) -> Vec<&TextPrimitive> {
        self.frame_ops()
            .filter_map(|op| match op {
                DrawOp::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Messages recorded since the last clear.
    pub fn messages(&self) -> Vec<(&str, &str)> {
        self.frame_ops()
            .filter_map(|op| match op {
                DrawOp::Message { message, hint } => Some((message.as_str(), hint.as_str())),
                _ => None,
            })
            .collect()
    }

    fn frame_ops(&self) -> impl Iterator<Item = &DrawOp> {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.ops[start..].iter()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_arc(&mut self, arc: ArcPrimitive) {
        self.ops.push(DrawOp::Arc(arc));
    }

    fn draw_text(&mut self, text: TextPrimitive) {
        self.ops.push(DrawOp::Text(text));
    }

    fn show_message(&mut self, message: &str, hint: &str) {
        self.ops.push(DrawOp::Message {
            message: message.to_string(),
            hint: hint.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(fill: &str) -> ArcPrimitive {
        ArcPrimitive {
            cx: 0.0,
            cy: 0.0,
            start_angle: 0.0,
            end_angle: 1.0,
            inner_radius: 10.0,
            outer_radius: 20.0,
            fill: fill.to_string(),
            opacity: 1.0,
        }
    }

    #[test]
    fn recording_accumulates_ops() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.fill_arc(arc("#111111"));
        surface.fill_arc(arc("#222222"));
        assert_eq!(surface.arcs().len(), 2);
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn frame_accessors_ignore_earlier_frames() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.fill_arc(arc("#111111"));
        surface.clear();
        surface.fill_arc(arc("#222222"));
        let arcs = surface.arcs();
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].fill, "#222222");
    }

    #[test]
    fn messages_are_recorded() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.show_message("broken", "fix it");
        assert_eq!(surface.messages(), vec![("broken", "fix it")]);
    }
}
