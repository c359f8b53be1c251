//! Worksheet type

use std::collections::HashMap;

use crate::address::CellAddress;
use crate::error::{Error, Result};
use crate::value::CellValue;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Stores the cells that were defined in the source file, including cells
/// that carry no value. The distinction matters for row snapshots: a row's
/// extent is the rightmost column with any cell defined in that row.
#[derive(Debug, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sparse cell storage keyed by (row, col)
    cells: HashMap<(u32, u16), CellValue>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a cell value by 0-based row and column indices
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        self.cells.insert((row, col), value.into());
        Ok(())
    }

    /// Get a cell value by 0-based indices, [`CellValue::Empty`] when the
    /// cell is undefined
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Get a cell value by address string (e.g., "E2")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Check whether the sheet has no defined cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of defined cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Rightmost defined column in a row (0-based), if the row has any cells
    pub fn row_extent(&self, row: u32) -> Option<u16> {
        self.cells
            .keys()
            .filter(|(r, _)| *r == row)
            .map(|(_, c)| *c)
            .max()
    }

    /// Snapshot of one row's values (0-based row index)
    ///
    /// The returned sequence runs from column A to the row's extent, with
    /// [`CellValue::Empty`] for gaps. A row with no defined cells yields an
    /// empty vector.
    pub fn row_values(&self, row: u32) -> Vec<CellValue> {
        match self.row_extent(row) {
            Some(max_col) => (0..=max_col)
                .map(|col| self.get_value_at(row, col))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Bottom-right extent of the used area as 0-based (row, col) indices
    pub fn dimensions(&self) -> Option<(u32, u16)> {
        if self.cells.is_empty() {
            return None;
        }
        let max_row = self.cells.keys().map(|(r, _)| *r).max().unwrap_or(0);
        let max_col = self.cells.keys().map(|(_, c)| *c).max().unwrap_or(0);
        Some((max_row, max_col))
    }
}
