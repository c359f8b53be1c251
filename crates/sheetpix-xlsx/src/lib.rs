//! XLSX (Office Open XML) support for sheetpix.
//!
//! Two entry points:
//! - [`XlsxReader`] parses a package into a [`sheetpix_core::Workbook`] of
//!   scalar cell values.
//! - [`SheetPictures`] indexes the embedded pictures of a single sheet by
//!   their anchor cell, without parsing any cell values.

pub mod error;
mod package;
pub mod pictures;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use pictures::SheetPictures;
pub use reader::XlsxReader;
