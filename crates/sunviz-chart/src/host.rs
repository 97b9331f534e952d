#![forbid(unsafe_code)]

//! Host environment capabilities.
//!
//! The chart never reaches into an ambient registry; palettes, theme, and
//! the drilldown navigation sink are injected through these traits so the
//! core runs (and tests) without any host runtime present.

/// A color token: hex or named CSS-style color text, passed through to the
/// drawing surface untouched.
pub type ColorToken = String;

/// Host theme identity, used by palettes to pick appropriate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

/// Where the host reports its active theme.
pub trait ThemeSource {
    fn current_theme(&self) -> ThemeKind;
}

/// A fixed theme is itself a valid source.
impl ThemeSource for ThemeKind {
    fn current_theme(&self) -> ThemeKind {
        *self
    }
}

/// Palette lookup capability.
///
/// Within one draw cycle the mapping must be a pure function of the key, so
/// equal-named wedges across the tree always share a color. `begin_cycle`
/// marks the cycle boundary; stateful scales reset there.
pub trait Palette {
    /// Called once before each rendered frame.
    fn begin_cycle(&mut self, theme: ThemeKind) {
        let _ = theme;
    }

    /// Color for `key` under the configured palette `selector`.
    fn color_for(&mut self, key: &str, selector: &str) -> ColorToken;
}

/// Receiver for drilldown activation payloads.
pub trait DrilldownSink {
    /// One call per activation, pairs in dataset field order.
    fn emit(&mut self, payload: &[(String, String)]);
}

/// Sink that drops every payload, for hosts without navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl DrilldownSink for DiscardSink {
    fn emit(&mut self, _payload: &[(String, String)]) {}
}
