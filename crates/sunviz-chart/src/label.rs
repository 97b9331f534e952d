#![forbid(unsafe_code)]

//! Label truncation.
//!
//! The surface is abstract, so there is no text measurer to iterate
//! against; rendered width is estimated from display columns (wide glyphs
//! count double) times an average advance per em. Truncation is
//! grapheme-safe and marks cut labels with an ellipsis.

use unicode_display_width::width as display_width;
use unicode_segmentation::UnicodeSegmentation;

/// Estimated advance of one display column, as a fraction of the font
/// size. Matches an average sans-serif glyph closely enough for layout
/// decisions.
pub const AVG_GLYPH_EM: f64 = 0.5;

/// Estimated rendered width of `text` at `font_px`, in pixels.
pub fn estimated_width(text: &str, font_px: f64) -> f64 {
    display_width(text) as f64 * font_px * AVG_GLYPH_EM
}

/// Truncate `text` to fit `max_px`, appending `…` when anything was cut.
///
/// A budget too small for even one glyph still yields a bare ellipsis, so
/// a visible arc never renders a label fragment without the cut marker.
pub fn truncate_label(text: &str, max_px: f64, font_px: f64) -> String {
    if estimated_width(text, font_px) <= max_px {
        return text.to_string();
    }

    let glyph = font_px * AVG_GLYPH_EM;
    let mut kept_cols = 0.0;
    let mut out = String::new();
    for grapheme in text.graphemes(true) {
        let cols = display_width(grapheme) as f64;
        // Reserve one column for the ellipsis itself.
        if (kept_cols + cols + 1.0) * glyph > max_px {
            break;
        }
        out.push_str(grapheme);
        kept_cols += cols;
    }
    out.push('…');
    out
}
