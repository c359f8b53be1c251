//! # sheetpix-core
//!
//! Core data structures for the sheetpix extraction library.
//!
//! This crate provides the fundamental types used throughout sheetpix:
//! - [`CellAddress`] - A1-style cell addressing and column-letter math
//! - [`CellValue`] - Scalar cell values (numbers, strings, booleans, errors)
//! - [`CellContent`] and [`PictureData`] - Resolved cell content, including
//!   embedded pictures and the "checked, no picture" marker
//! - [`Workbook`], [`Worksheet`] - Parsed spreadsheet containers
//!
//! ## Example
//!
//! ```rust
//! use sheetpix_core::{CellAddress, CellValue, Worksheet};
//!
//! let addr = CellAddress::parse("E2").unwrap();
//! assert_eq!((addr.row, addr.col), (1, 4));
//!
//! let mut sheet = Worksheet::new("Catalog");
//! sheet.set_value_at(1, 4, CellValue::string("widget")).unwrap();
//! assert_eq!(sheet.get_value("E2").unwrap(), CellValue::string("widget"));
//! ```

pub mod address;
pub mod content;
pub mod error;
pub mod value;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use address::CellAddress;
pub use content::{CellContent, PictureData};
pub use error::{Error, Result};
pub use value::{CellError, CellValue};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
