#![forbid(unsafe_code)]

//! Chart configuration.
//!
//! Options arrive as flat string key/value pairs from the host, possibly
//! namespace-prefixed (`display.visualizations.custom...mode`); only the
//! last dotted segment of a key is significant. Unknown keys are ignored
//! and unparsable values fall back to their defaults, so a stale or partial
//! option set can never abort a draw.

use std::collections::HashMap;

/// Rendering and interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    /// Flat sunburst, hover only.
    #[default]
    Static,
    /// Multi-ring zoomable sunburst with click-to-focus.
    Zoomable,
    /// Flat sunburst; clicks publish drilldown tokens.
    Token,
    /// Flat sunburst; clicks emit a drilldown navigation event.
    Drilldown,
}

impl ChartMode {
    /// Parse a mode option value. Unrecognized values render flat.
    pub fn from_option(value: &str) -> Self {
        match value {
            "zoomable" => ChartMode::Zoomable,
            "token" => ChartMode::Token,
            "drilldown" => ChartMode::Drilldown,
            _ => ChartMode::Static,
        }
    }

    /// Whether this mode uses the single-pass flat layout.
    pub fn is_flat(self) -> bool {
        !matches!(self, ChartMode::Zoomable)
    }

    /// Whether node activation emits a drilldown payload.
    pub fn emits_drilldown(self) -> bool {
        matches!(self, ChartMode::Token | ChartMode::Drilldown)
    }
}

/// Which name keys the palette lookup for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// The nearest depth-1 ancestor's name. Keeps whole top-level wedges in
    /// one hue.
    #[default]
    Root,
    /// The immediate parent's name.
    Parent,
    /// The node's own name.
    Own,
}

impl ColorMode {
    /// Parse a colormode option value. Anything but `root`/`parent` keys by
    /// the node's own name.
    pub fn from_option(value: &str) -> Self {
        match value {
            "root" => ColorMode::Root,
            "parent" => ColorMode::Parent,
            _ => ColorMode::Own,
        }
    }
}

/// Parsed chart configuration with every option at its default or
/// caller-supplied value.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub mode: ChartMode,
    /// Labels drawn at all (the `labels` option is `show`/`hide`).
    pub show_labels: bool,
    /// Breadcrumb trail emitted on hover (`breadcrumbs` option).
    pub show_breadcrumbs: bool,
    /// Label size as a percentage of the 16px base font.
    pub label_size: f64,
    /// Maximum rendered label width in pixels before truncation.
    pub label_width: f64,
    /// Label fill color token.
    pub label_color: String,
    pub color_mode: ColorMode,
    /// Palette selector handed to the palette capability.
    pub palette: String,
    /// Fallback drilldown value for fields absent from a node's snapshot.
    pub null_token: String,
    /// Valid-row cap; exceeding it aborts the draw.
    pub max_rows: usize,
    /// Segment metadata separator. `None` disables splitting.
    pub delimiter: Option<String>,
    /// Exact-name color overrides, highest-precedence palette source.
    pub color_override: HashMap<String, String>,
    /// Set when the coloroverride option failed to parse and was replaced
    /// with an empty map. Diagnostic only, never a draw error.
    pub color_override_malformed: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            mode: ChartMode::Static,
            show_labels: true,
            show_breadcrumbs: false,
            label_size: 100.0,
            label_width: 100.0,
            label_color: "#000000".to_string(),
            color_mode: ColorMode::Root,
            palette: "schemeCategory10".to_string(),
            null_token: String::new(),
            max_rows: 1500,
            delimiter: None,
            color_override: HashMap::new(),
            color_override_malformed: false,
        }
    }
}

impl ChartConfig {
    /// Build a configuration from host option pairs.
    pub fn from_options<'a, I>(options: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            let key = key.rsplit('.').next().unwrap_or(key);
            match key {
                "mode" => config.mode = ChartMode::from_option(value),
                "labels" => config.show_labels = value == "show",
                "breadcrumbs" => config.show_breadcrumbs = value == "show",
                "labelsize" => config.label_size = parse_f64(value, 100.0),
                "labelwidth" => config.label_width = parse_f64(value, 100.0),
                "labelcolor" => config.label_color = value.to_string(),
                "colormode" => config.color_mode = ColorMode::from_option(value),
                "color" => config.palette = value.to_string(),
                "nulltoken" => config.null_token = value.to_string(),
                "maxrows" => {
                    config.max_rows = value.trim().parse().unwrap_or(config.max_rows);
                }
                "delimiter" => {
                    config.delimiter = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    };
                }
                "coloroverride" => {
                    let (map, malformed) = parse_color_override(value);
                    config.color_override = map;
                    config.color_override_malformed = malformed;
                }
                _ => {}
            }
        }
        config
    }

    /// Label font size in pixels (the labelsize option scales a 16px base).
    pub fn font_px(&self) -> f64 {
        self.label_size / 100.0 * 16.0
    }
}

fn parse_f64(value: &str, default: f64) -> f64 {
    value.trim().parse().unwrap_or(default)
}

/// Parse the coloroverride option.
///
/// Two accepted shapes: a JSON object of name to color token, or a flat
/// `name,color,name,color,...` list (a trailing unpaired name is dropped).
/// Returns the map plus a malformed flag; a bad value recovers to an empty
/// map rather than failing the draw.
fn parse_color_override(raw: &str) -> (HashMap<String, String>, bool) {
    if raw.starts_with('{') {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(entries)) => {
                let map = entries
                    .into_iter()
                    .filter_map(|(name, value)| match value {
                        serde_json::Value::String(color) => Some((name, color)),
                        _ => None,
                    })
                    .collect();
                (map, false)
            }
            _ => (HashMap::new(), true),
        }
    } else {
        let parts: Vec<&str> = raw.split(',').collect();
        let mut map = HashMap::new();
        let mut i = 0;
        while i + 1 < parts.len() {
            map.insert(parts[i].to_string(), parts[i + 1].to_string());
            i += 2;
        }
        (map, false)
    }
}
