#![forbid(unsafe_code)]

//! Row-to-hierarchy aggregation.
//!
//! Walks the dataset once, merging rows that share dimension-path prefixes
//! into branch nodes and appending one leaf per valid row. Per-segment
//! metadata (display name, tooltip, color) rides inside cell text behind an
//! optional delimiter; per-row color lists cascade outward across depth.
//!
//! Aggregation either yields a complete tree plus diagnostics or fails with
//! one of the terminal [`AggregateError`] kinds. No partial tree ever
//! reaches layout.

use std::collections::HashMap;
use std::fmt;

use crate::config::ChartConfig;
use crate::dataset::{Cell, Dataset, is_blank};
use crate::tree::{Hierarchy, Node};

/// Terminal aggregation failures. Each aborts the draw cycle and is shown
/// in place of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Every row was skipped because its measure cell is not numeric.
    NoNumericValues,
    /// The dataset has one field or fewer, so no hierarchy path exists.
    TooFewColumns,
    /// More valid rows than the configured cap.
    RowLimitExceeded { rows: usize, limit: usize },
}

impl AggregateError {
    /// Stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoNumericValues => "no-numeric-values",
            Self::TooFewColumns => "too-few-columns",
            Self::RowLimitExceeded { .. } => "row-limit-exceeded",
        }
    }

    /// A human-readable recovery hint to show alongside the message.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::NoNumericValues => "Make sure the final column of every row holds a number.",
            Self::TooFewColumns => "Add at least one label column before the numeric column.",
            Self::RowLimitExceeded { .. } => {
                "Raise the row limit in the formatting settings or narrow the search."
            }
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNumericValues => {
                write!(f, "Last column of data must contain numeric values.")
            }
            Self::TooFewColumns => write!(f, "There must be at least 1 column of labels."),
            Self::RowLimitExceeded { rows, limit } => write!(
                f,
                "Too many rows of data. (Total rows: {rows}, Limit: {limit})"
            ),
        }
    }
}

impl std::error::Error for AggregateError {}

/// Non-fatal counters gathered while aggregating.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Diagnostics {
    /// Rows that contributed a leaf.
    pub valid_rows: usize,
    /// Rows dropped for a non-numeric measure or an empty dimension path.
    pub skipped_rows: usize,
    /// Sum of all valid measure values.
    pub total: f64,
}

/// A completed aggregation: the tree plus its diagnostics.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub tree: Hierarchy,
    pub diagnostics: Diagnostics,
}

/// Per-segment metadata split out of raw cell text.
struct Segment<'a> {
    name: &'a str,
    tooltip: Option<&'a str>,
    color: Option<&'a str>,
}

/// Split `raw` on the configured delimiter into display name, tooltip, and
/// color. Empty parts count as absent; parts past the third are ignored.
fn split_segment<'a>(raw: &'a str, delimiter: Option<&str>) -> Segment<'a> {
    let Some(delim) = delimiter.filter(|d| !d.is_empty() && raw.contains(*d)) else {
        return Segment {
            name: raw,
            tooltip: None,
            color: None,
        };
    };
    let mut parts = raw.split(delim);
    let name = parts.next().unwrap_or("");
    let tooltip = parts.next().filter(|s| !s.is_empty());
    let color = parts.next().filter(|s| !s.is_empty());
    Segment {
        name,
        tooltip,
        color,
    }
}

/// Parse a measure cell. Blank or non-numeric cells skip the row.
fn parse_measure(cell: &Cell) -> Option<f64> {
    match cell {
        Some(text) if !text.is_empty() => text.trim().parse().ok(),
        _ => None,
    }
}

/// Split a color-field cell into its per-depth token list: comma separated,
/// whitespace trimmed, empty tokens dropped.
fn color_list(cell: &Cell) -> Vec<String> {
    match cell {
        Some(text) => text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// The display-name part of a raw cell, for drilldown snapshots.
fn stripped_value(cell: &Cell, delimiter: Option<&str>) -> String {
    let raw = cell.as_deref().unwrap_or("");
    split_segment(raw, delimiter).name.to_string()
}

/// Build the hierarchy for one draw cycle.
///
/// Row handling: a blank or non-numeric measure skips the row; trailing
/// blank dimension cells are trimmed (interior blanks become the literal
/// segment name `""`); a row whose trimmed path is empty is skipped, so
/// every valid row contributes exactly one leaf.
pub fn aggregate(data: &Dataset, config: &ChartConfig) -> Result<Aggregate, AggregateError> {
    let mut tree = Hierarchy::new();
    let mut diagnostics = Diagnostics::default();
    let mut non_numeric = 0usize;

    let measure_index = data.measure_index();
    let color_index = data.color_index();
    let dimensions = data.dimension_indices();
    let delimiter = config.delimiter.as_deref();

    for row in data.rows() {
        let value = measure_index.and_then(|i| parse_measure(&row[i]));
        let Some(value) = value else {
            non_numeric += 1;
            diagnostics.skipped_rows += 1;
            continue;
        };

        let mut path: Vec<usize> = dimensions.clone();
        while path.last().is_some_and(|&i| is_blank(&row[i])) {
            path.pop();
        }
        if path.is_empty() {
            diagnostics.skipped_rows += 1;
            continue;
        }

        diagnostics.valid_rows += 1;
        diagnostics.total += value;

        let colors = match color_index {
            Some(i) => color_list(&row[i]),
            None => Vec::new(),
        };

        let mut current = tree.root();
        for (j, &field) in path.iter().enumerate() {
            let raw = row[field].as_deref().unwrap_or("");
            let segment = split_segment(raw, delimiter);
            let segment_color = segment
                .color
                .map(str::to_string)
                .or_else(|| colors.get(j).cloned())
                .or_else(|| colors.last().cloned());

            if j + 1 < path.len() {
                if let Some(existing) = tree.branch_child(current, segment.name) {
                    // Reused prefix: only an absent color may be filled in.
                    let node = tree.node_mut(existing);
                    if node.color.is_none() {
                        node.color = segment_color;
                    }
                    current = existing;
                } else {
                    let mut node = Node::branch(segment.name.to_string());
                    node.tooltip = segment.tooltip.map(str::to_string);
                    node.color = segment_color;
                    node.drilldown = drilldown_snapshot(data, row, &path[..=j], delimiter);
                    current = tree.add_child(current, node);
                }
            } else {
                // Terminal depth: leaves never merge, even on name collision.
                let mut node = Node::leaf(segment.name.to_string(), value);
                node.tooltip = segment.tooltip.map(str::to_string);
                node.color = segment_color;
                node.drilldown = drilldown_snapshot(data, row, &dimensions, delimiter);
                tree.add_child(current, node);
            }
        }
    }

    // Empty-path skips do not count here: a measure-only dataset falls
    // through to the column check below instead.
    if non_numeric > 0 && diagnostics.valid_rows == 0 {
        return Err(AggregateError::NoNumericValues);
    }
    if data.field_count() <= 1 {
        return Err(AggregateError::TooFewColumns);
    }
    if diagnostics.valid_rows > config.max_rows {
        return Err(AggregateError::RowLimitExceeded {
            rows: diagnostics.valid_rows,
            limit: config.max_rows,
        });
    }

    Ok(Aggregate { tree, diagnostics })
}

fn drilldown_snapshot(
    data: &Dataset,
    row: &[Cell],
    fields: &[usize],
    delimiter: Option<&str>,
) -> HashMap<String, String> {
    fields
        .iter()
        .map(|&i| (data.fields()[i].clone(), stripped_value(&row[i], delimiter)))
        .collect()
}
