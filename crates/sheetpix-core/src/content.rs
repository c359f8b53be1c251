//! Resolved cell content
//!
//! A blank cell in the container is ambiguous: it is either truly empty or
//! the anchor of an embedded picture (pictures never occupy the value slot).
//! [`CellContent`] is the post-resolution view of a cell, where that
//! ambiguity has been settled one way or the other.

use crate::value::CellValue;

/// Picture bytes in the requested encoding
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PictureData {
    /// PNG-encoded bytes
    Png(Vec<u8>),
    /// Standard base64 text encoding of the PNG bytes
    Base64(String),
}

impl PictureData {
    /// Borrow the PNG bytes, if this is the raw encoding
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PictureData::Png(b) => Some(b),
            PictureData::Base64(_) => None,
        }
    }

    /// Borrow the base64 text, if this is the base64 encoding
    pub fn as_base64(&self) -> Option<&str> {
        match self {
            PictureData::Png(_) => None,
            PictureData::Base64(s) => Some(s),
        }
    }
}

/// Content of a single cell after picture resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellContent {
    /// Scalar value read from the sheet (may be [`CellValue::Empty`] when no
    /// picture probe was requested)
    Value(CellValue),
    /// Embedded picture anchored at this cell
    Picture(PictureData),
    /// Blank cell that was checked and holds no picture
    NoPicture,
}

impl CellContent {
    /// Check whether this is a resolved picture
    pub fn is_picture(&self) -> bool {
        matches!(self, CellContent::Picture(_))
    }

    /// Borrow the scalar value, if any
    pub fn as_value(&self) -> Option<&CellValue> {
        match self {
            CellContent::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the picture data, if any
    pub fn as_picture(&self) -> Option<&PictureData> {
        match self {
            CellContent::Picture(p) => Some(p),
            _ => None,
        }
    }
}

impl From<CellValue> for CellContent {
    fn from(v: CellValue) -> Self {
        CellContent::Value(v)
    }
}
