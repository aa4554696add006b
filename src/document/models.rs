// src/document/models.rs
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A single cell as delivered by the layout step.
///
/// Anything JSON can hold is accepted; arrays and objects end up in `Other`
/// and are treated as unrenderable by the scanners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl CellValue {
    /// String rendering used for keyword matching and numeric parsing.
    /// `None` means the cell is absent or cannot be rendered.
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            CellValue::Number(n) => Some(Cow::Owned(n.to_string())),
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Other(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Column identifier: a header label, or a position when the source table
/// had no usable header row or the header slot had no usable label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ColumnId {
    Named(String),
    Position(usize),
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Named(name) => write!(f, "{}", name),
            ColumnId::Position(idx) => write!(f, "#{}", idx),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: HashMap<ColumnId, CellValue>,
}

impl Row {
    pub fn get(&self, column: &ColumnId) -> Option<&CellValue> {
        self.cells.get(column)
    }
}

/// A tabular structure extracted from a source document.
///
/// Every row holds a cell for every column; cells missing from the input are
/// stored as `CellValue::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnId>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from explicit columns and positional row values.
    /// Short rows are padded with nulls, surplus values are dropped.
    pub fn new(columns: Vec<ColumnId>, rows: Vec<Vec<CellValue>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|values| {
                let mut values = values.into_iter();
                let cells = columns
                    .iter()
                    .map(|col| (col.clone(), values.next().unwrap_or(CellValue::Null)))
                    .collect();
                Row { cells }
            })
            .collect();

        Self { columns, rows }
    }

    /// Builds a table from the raw row lists produced by the layout step.
    ///
    /// The first row becomes the header whenever every remaining row has the
    /// same width. Header cells that are blank, unrenderable or repeat an
    /// earlier label are identified by their position instead. Otherwise all
    /// rows are kept and columns are numbered from zero.
    pub fn from_grid(mut grid: Vec<Vec<CellValue>>) -> Self {
        if let Some(columns) = header_columns(&grid) {
            let body = grid.split_off(1);
            return Self::new(columns, body);
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (0..width).map(ColumnId::Position).collect();
        Self::new(columns, grid)
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn header_columns(grid: &[Vec<CellValue>]) -> Option<Vec<ColumnId>> {
    let (header, body) = grid.split_first()?;
    if header.is_empty() || body.iter().any(|row| row.len() != header.len()) {
        return None;
    }

    let mut seen = HashSet::new();
    let columns = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let label = cell.render().map(|l| l.trim().to_string()).unwrap_or_default();
            if label.is_empty() || !seen.insert(label.clone()) {
                ColumnId::Position(idx)
            } else {
                ColumnId::Named(label)
            }
        })
        .collect();
    Some(columns)
}

/// Document as handed over by the layout collaborator: raw tables plus the
/// full page text, with optional labels carried into the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "tables")]
    pub raw_tables: Vec<Vec<Vec<CellValue>>>,
}

impl SourceDocument {
    /// Converts every raw grid into a `Table`, preserving order.
    pub fn tables(&self) -> Vec<Table> {
        self.raw_tables.iter().cloned().map(Table::from_grid).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_tables.is_empty() && self.text.trim().is_empty()
    }
}
