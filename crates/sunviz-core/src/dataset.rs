#![forbid(unsafe_code)]

//! Tabular input model.
//!
//! A [`Dataset`] is an ordered list of field names plus row-major cells, the
//! shape search results arrive in. Field order and row order are owned by
//! the caller and preserved verbatim; aggregation depends on both.

/// A single table cell. `None` and `""` are both treated as blank.
pub type Cell = Option<String>;

/// Name of the field whose cells carry per-depth color token lists.
///
/// There is no configuration option for this designation; a field is the
/// color field iff its name matches exactly.
pub const COLOR_FIELD: &str = "color";

/// Returns true for cells that count as blank (absent or empty).
#[inline]
pub fn is_blank(cell: &Cell) -> bool {
    match cell {
        None => true,
        Some(s) => s.is_empty(),
    }
}

/// An ordered tabular result set.
///
/// Exactly one field is the *measure* (the last field that is not the color
/// field); all remaining fields are *dimensions* forming the hierarchy path.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    fields: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create an empty dataset with the given field names, in column order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Rows shorter than the field count are padded with
    /// blanks; longer rows are truncated.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.fields.len(), None);
        self.rows.push(row);
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the color field, if any field is named [`COLOR_FIELD`].
    pub fn color_index(&self) -> Option<usize> {
        self.fields.iter().position(|f| f == COLOR_FIELD)
    }

    /// Index of the measure field: the last field that is not the color
    /// field. `None` when no such field exists.
    pub fn measure_index(&self) -> Option<usize> {
        let color = self.color_index();
        (0..self.fields.len()).rev().find(|&i| Some(i) != color)
    }

    /// Indices of the dimension fields (everything except measure and
    /// color), in column order.
    pub fn dimension_indices(&self) -> Vec<usize> {
        let color = self.color_index();
        let measure = self.measure_index();
        (0..self.fields.len())
            .filter(|&i| Some(i) != color && Some(i) != measure)
            .collect()
    }
}
