//! Stateful workbook accessor: sheet selection, row and cell reads

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::resolver::PictureResolver;
use sheetpix_core::{CellAddress, CellContent, CellValue, Error, PictureData, Workbook, Worksheet};
use sheetpix_xlsx::{SheetPictures, XlsxReader};

/// Options for [`PictureWorkbook::read_row`]
#[derive(Debug, Clone, Default)]
pub struct RowOptions {
    /// Probe blank cells for anchored pictures
    pub read_pictures: bool,
    /// Return picture payloads as base64 text instead of raw PNG bytes
    pub base64: bool,
    /// Column letters to probe (case-insensitive); empty means every blank
    /// cell is probed. Blank cells in columns outside a non-empty list are
    /// marked [`CellContent::NoPicture`] without a probe.
    pub picture_columns: Vec<String>,
}

/// A workbook opened for value and picture extraction
///
/// Parses the file once on open and keeps the sheet list (in declaration
/// order) with one "active" sheet for row and cell reads. Picture probes go
/// through [`PictureResolver`], which re-opens the file per call.
pub struct PictureWorkbook {
    path: PathBuf,
    workbook: Workbook,
}

impl PictureWorkbook {
    /// Open a workbook file
    ///
    /// Fails when the path is unreadable or not a valid XLSX package.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = XlsxReader::read_file(&path)?;
        Ok(Self { path, workbook })
    }

    /// Path the workbook was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in file declaration order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_count()
    }

    /// Name of the active sheet
    pub fn active_sheet_name(&self) -> &str {
        self.active_worksheet().name()
    }

    /// Index of the active sheet (0-based)
    pub fn active_sheet_index(&self) -> usize {
        self.workbook.active_sheet_index()
    }

    /// Make the named sheet active
    ///
    /// Fails with [`sheetpix_core::Error::SheetNotFound`] for an unknown
    /// name; the active sheet is left unchanged on failure.
    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        self.workbook.set_active_sheet(name)?;
        Ok(())
    }

    /// Make the sheet at the given 0-based index active
    pub fn set_active_sheet_index(&mut self, index: usize) -> Result<()> {
        self.workbook.set_active_sheet_index(index)?;
        Ok(())
    }

    /// Read a single cell of the active sheet by coordinate
    ///
    /// A cell with a picture anchored at it resolves to
    /// [`CellContent::Picture`] with base64 payload; any other cell yields
    /// its scalar value straight from the parsed sheet.
    pub fn read_cell(&self, coord: &str) -> Result<CellContent> {
        let addr = CellAddress::parse(coord)?;

        let pictures = SheetPictures::open(&self.path, self.active_sheet_index())?;
        if pictures.has_picture(addr) {
            return match PictureResolver::fetch_base64(
                &self.path,
                self.active_sheet_index(),
                coord,
            )? {
                Some(b64) => Ok(CellContent::Picture(PictureData::Base64(b64))),
                None => Ok(CellContent::NoPicture),
            };
        }

        Ok(CellContent::Value(
            self.active_worksheet().get_value_at(addr.row, addr.col),
        ))
    }

    /// Read one row of the active sheet
    ///
    /// `row_num` is 1-based. Returns `Ok(None)` when every cell in the row
    /// is empty; the emptiness check runs before any picture probing, so a
    /// row whose only content is a picture also reads as `None`.
    ///
    /// With `read_pictures` set, each blank cell is resolved to either a
    /// picture payload or [`CellContent::NoPicture`]; otherwise raw values
    /// are returned as-is.
    pub fn read_row(&self, row_num: u32, options: &RowOptions) -> Result<Option<Vec<CellContent>>> {
        if row_num == 0 {
            return Err(Error::InvalidAddress("row number must be >= 1".into()).into());
        }

        let values = self.active_worksheet().row_values(row_num - 1);
        if values.iter().all(CellValue::is_empty) {
            return Ok(None);
        }

        if !options.read_pictures {
            return Ok(Some(values.into_iter().map(CellContent::Value).collect()));
        }

        self.backfill_pictures(row_num, values, options).map(Some)
    }

    /// Replace each blank position with a resolved picture or the
    /// checked-and-empty marker
    fn backfill_pictures(
        &self,
        row_num: u32,
        values: Vec<CellValue>,
        options: &RowOptions,
    ) -> Result<Vec<CellContent>> {
        let mut contents = Vec::with_capacity(values.len());

        for (col, value) in values.into_iter().enumerate() {
            if !value.is_empty() {
                contents.push(CellContent::Value(value));
                continue;
            }

            let letter = CellAddress::column_to_letters(col as u16);
            let allowed = options.picture_columns.is_empty()
                || options
                    .picture_columns
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(&letter));
            if !allowed {
                contents.push(CellContent::NoPicture);
                continue;
            }

            let coord = format!("{}{}", letter, row_num);
            log::debug!("probing for picture at {}", coord);

            let resolved = if options.base64 {
                PictureResolver::fetch_base64(&self.path, self.active_sheet_index(), &coord)?
                    .map(PictureData::Base64)
            } else {
                PictureResolver::fetch(&self.path, self.active_sheet_index(), &coord)?
                    .map(PictureData::Png)
            };

            contents.push(match resolved {
                Some(data) => CellContent::Picture(data),
                None => CellContent::NoPicture,
            });
        }

        Ok(contents)
    }

    fn active_worksheet(&self) -> &Worksheet {
        self.workbook
            .active_worksheet()
            .expect("open() guarantees at least one sheet")
    }
}
