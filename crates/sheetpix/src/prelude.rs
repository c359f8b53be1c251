//! Prelude module - common imports for sheetpix users
//!
//! ```rust
//! use sheetpix::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellAddress,
    CellContent,
    CellError,
    CellValue,

    // Error types
    Error,
    PictureData,
    // Main types
    PictureResolver,
    PictureWorkbook,
    Result,
    RowOptions,

    // I/O types
    SheetPictures,
    XlsxError,
    XlsxReader,
};
