//! Error type for the extraction facade

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting values and pictures
#[derive(Debug, Error)]
pub enum Error {
    /// Failure opening or parsing the workbook container
    #[error("Workbook error: {0}")]
    Xlsx(#[from] sheetpix_xlsx::XlsxError),

    /// Invalid address, unknown sheet, or other core-model failure
    #[error("{0}")]
    Core(#[from] sheetpix_core::Error),

    /// Failure decoding or re-encoding an embedded picture
    #[error("Picture error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error writing a picture to disk
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
