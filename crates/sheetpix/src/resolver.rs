//! Stateless cell picture resolution
//!
//! Every call opens its own workbook handle from the file path, queries the
//! picture layer, and releases the handle on return. Nothing is shared with
//! [`PictureWorkbook`](crate::PictureWorkbook), so a resolver call always
//! sees the file's own sheet ordering, unaffected by any accessor's
//! active-sheet state.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;

use crate::error::Result;
use sheetpix_core::CellAddress;
use sheetpix_xlsx::SheetPictures;

/// Resolves the picture anchored at a single cell
///
/// Each method is a pure function of (file path, sheet index, coordinate)
/// and produces exactly one kind of output: PNG bytes, base64 text, or a
/// file on disk. A coordinate with no anchored picture is a negative
/// result (`None` / `false`), never an error.
pub struct PictureResolver;

impl PictureResolver {
    /// Fetch the picture anchored at `coord`, re-encoded as PNG
    ///
    /// `sheet_index` is 0-based into the file's own sheet ordering.
    pub fn fetch<P: AsRef<Path>>(
        path: P,
        sheet_index: usize,
        coord: &str,
    ) -> Result<Option<Vec<u8>>> {
        let addr = CellAddress::parse(coord)?;
        let mut pictures = SheetPictures::open(path, sheet_index)?;

        let raw = match pictures.picture_bytes(addr)? {
            Some(raw) => raw,
            None => {
                log::debug!("no picture anchored at {}", coord);
                return Ok(None);
            }
        };

        Ok(Some(Self::encode_png(&raw)?))
    }

    /// Fetch the picture anchored at `coord` as standard base64 text of the
    /// PNG bytes (no line wrapping)
    pub fn fetch_base64<P: AsRef<Path>>(
        path: P,
        sheet_index: usize,
        coord: &str,
    ) -> Result<Option<String>> {
        Ok(Self::fetch(path, sheet_index, coord)?.map(|png| STANDARD.encode(png)))
    }

    /// Save the picture anchored at `coord` to `dest`, in the format implied
    /// by the destination extension
    ///
    /// Returns `true` when a picture was found and written, `false` when the
    /// coordinate holds none (nothing is written).
    pub fn save_to<P: AsRef<Path>, Q: AsRef<Path>>(
        path: P,
        sheet_index: usize,
        coord: &str,
        dest: Q,
    ) -> Result<bool> {
        let addr = CellAddress::parse(coord)?;
        let mut pictures = SheetPictures::open(path, sheet_index)?;

        let raw = match pictures.picture_bytes(addr)? {
            Some(raw) => raw,
            None => return Ok(false),
        };

        let img = image::load_from_memory(&raw)?;
        img.save(dest)?;
        Ok(true)
    }

    /// Decode embedded bytes and re-encode them as PNG
    fn encode_png(raw: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(raw)?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}
