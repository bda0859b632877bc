//! In-memory representation of an uploaded parts table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// Everything starts as text; the normalizer turns vendor price columns
/// into numbers and leaves every other column alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, if this cell has been normalized to a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Text value, if this cell is still raw text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One row of the parts table, keyed by column name in header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartRow {
    cells: IndexMap<String, Cell>,
}

impl PartRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell insertion, mostly for tests and programmatic tables.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.cells.insert(column.into(), cell.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn get_mut(&mut self, column: &str) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }

    /// Render a cell as display text; missing cells render empty.
    #[must_use]
    pub fn text(&self, column: &str) -> String {
        self.cells
            .get(column)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Cell)> {
        self.cells.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A parts table: ordered headers plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartsTable {
    headers: Vec<String>,
    rows: Vec<PartRow>,
}

impl PartsTable {
    #[must_use]
    pub const fn new(headers: Vec<String>, rows: Vec<PartRow>) -> Self {
        Self { headers, rows }
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[PartRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [PartRow] {
        &mut self.rows
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, used for the upload preview.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
