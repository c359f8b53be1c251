//! # sheetpix
//!
//! Extract embedded pictures and cell values from XLSX workbooks.
//!
//! Spreadsheets used as product catalogs often carry inline pictures next
//! to their tabular data. Those pictures never occupy a cell's value slot,
//! so a plain cell read sees only a blank. This crate reads rows and cells
//! with that ambiguity resolved: blank cells can be probed against the
//! sheet's picture layer, and anchored pictures come back as PNG bytes or
//! base64 text.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetpix::prelude::*;
//!
//! # fn main() -> sheetpix::Result<()> {
//! let mut workbook = PictureWorkbook::open("catalog.xlsx")?;
//! workbook.set_active_sheet("Products")?;
//!
//! // Row 2, with blank cells probed for pictures
//! let options = RowOptions {
//!     read_pictures: true,
//!     ..Default::default()
//! };
//! if let Some(row) = workbook.read_row(2, &options)? {
//!     for content in &row {
//!         match content {
//!             CellContent::Value(v) => println!("value: {}", v),
//!             CellContent::Picture(_) => println!("picture"),
//!             CellContent::NoPicture => println!("blank"),
//!         }
//!     }
//! }
//!
//! // One-shot lookup without an accessor
//! let png = PictureResolver::fetch("catalog.xlsx", 0, "E2")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prelude;
pub mod resolver;
pub mod workbook;

pub use error::{Error, Result};
pub use resolver::PictureResolver;
pub use workbook::{PictureWorkbook, RowOptions};

// Re-export core types
pub use sheetpix_core::{
    CellAddress, CellContent, CellError, CellValue, PictureData, Workbook, Worksheet, MAX_COLS,
    MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use sheetpix_xlsx::{SheetPictures, XlsxError, XlsxReader};
