// src/extractors/table.rs
use crate::document::models::{ColumnId, Row, Table};
use crate::extractors::keywords::AliasSet;
use crate::extractors::numeric::parse_cell_number;

/// Where a table scan found its value.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHit {
    pub row: usize,
    pub label_column: ColumnId,
    pub value_column: ColumnId,
    pub value: f64,
}

/// Scans one table for a cell matching `aliases` and returns the first
/// number to its right in the same row.
pub fn scan(table: &Table, aliases: &AliasSet) -> Option<f64> {
    scan_with_location(table, aliases).map(|hit| hit.value)
}

/// Same as [`scan`], but reports the cell coordinates of the hit.
///
/// Traversal is column-major: every row of the first column is tried before
/// the second column is looked at. A label without a number to its right
/// does not stop the scan.
pub fn scan_with_location(table: &Table, aliases: &AliasSet) -> Option<TableHit> {
    let columns = table.columns();

    for (col_idx, column) in columns.iter().enumerate() {
        for (row_idx, row) in table.rows().iter().enumerate() {
            let Some(label) = row.get(column).and_then(|cell| cell.render()) else {
                continue;
            };
            if !aliases.matches(&label) {
                continue;
            }
            tracing::trace!("Label match '{}' at row {} column {}", label, row_idx, column);

            match number_right_of(row, &columns[col_idx + 1..]) {
                Some((value_column, value)) => {
                    return Some(TableHit {
                        row: row_idx,
                        label_column: column.clone(),
                        value_column: value_column.clone(),
                        value,
                    });
                }
                None => {
                    tracing::trace!("No numeric cell right of row {} column {}", row_idx, column);
                }
            }
        }
    }

    None
}

fn number_right_of<'a>(row: &Row, columns: &'a [ColumnId]) -> Option<(&'a ColumnId, f64)> {
    columns.iter().find_map(|column| {
        let rendered = row.get(column)?.render()?;
        parse_cell_number(&rendered).map(|value| (column, value))
    })
}
