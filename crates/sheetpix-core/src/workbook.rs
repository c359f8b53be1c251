//! Workbook type - the parsed document structure

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Holds the worksheets in file declaration order and tracks which sheet is
/// "active" for row and cell reads. Sheets are never added or removed after
/// parsing, so name-to-index lookups stay valid for the workbook's lifetime.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in declaration order
    worksheets: Vec<Worksheet>,
    /// Active sheet index
    active_sheet: usize,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by 0-based index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by 0-based index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Sheet names in declaration order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|ws| ws.name()).collect()
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Index of the active sheet (0-based)
    pub fn active_sheet_index(&self) -> usize {
        self.active_sheet
    }

    /// The active worksheet, if the workbook has any sheets
    pub fn active_worksheet(&self) -> Option<&Worksheet> {
        self.worksheets.get(self.active_sheet)
    }

    /// Make the named sheet active
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        match self.sheet_index(name) {
            Some(index) => {
                self.active_sheet = index;
                Ok(())
            }
            None => Err(Error::SheetNotFound(name.to_string())),
        }
    }

    /// Make the sheet at the given 0-based index active
    pub fn set_active_sheet_index(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// Add a new worksheet with the specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("empty name".into()));
        }
        if name.len() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "name longer than {} characters: {}",
                MAX_SHEET_NAME_LEN, name
            )));
        }
        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::empty()
    }
}
