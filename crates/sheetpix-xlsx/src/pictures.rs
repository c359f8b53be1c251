//! Picture-anchor index over one sheet
//!
//! Embedded pictures live outside the cell grid:
//! - `xl/drawings/drawingN.xml` holds picture elements with anchor cells and
//!   relationship IDs
//! - `xl/drawings/_rels/drawingN.xml.rels` maps relationship IDs to media
//!   parts under `xl/media/`
//!
//! A sheet reaches its drawing part through its own relationships, so the
//! index follows the graph rather than guessing part names.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::package;
use sheetpix_core::CellAddress;

/// Index of the embedded pictures anchored on a single sheet
///
/// Each instance owns its archive handle: opening, querying and fetching are
/// scoped to one lookup session, independent of any other open handle on the
/// same file.
#[derive(Debug)]
pub struct SheetPictures<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    sheet_name: String,
    /// Anchor cell (0-based row, col) -> media part path
    anchors: HashMap<(u32, u16), String>,
}

impl SheetPictures<BufReader<File>> {
    /// Open a workbook file and index the pictures of the sheet at
    /// `sheet_index` (0-based, file declaration order)
    pub fn open<P: AsRef<Path>>(path: P, sheet_index: usize) -> XlsxResult<Self> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file), sheet_index)
    }
}

impl<R: Read + Seek> SheetPictures<R> {
    /// Build the index from a reader
    pub fn read(reader: R, sheet_index: usize) -> XlsxResult<Self> {
        let mut archive = zip::ZipArchive::new(reader)?;

        package::check_package(&mut archive)?;

        let sheets = package::read_workbook_xml(&mut archive)?;
        let (sheet_name, r_id) =
            sheets
                .get(sheet_index)
                .cloned()
                .ok_or(XlsxError::SheetIndex {
                    index: sheet_index,
                    count: sheets.len(),
                })?;

        let sheet_paths = package::read_relationships(
            &mut archive,
            "xl/_rels/workbook.xml.rels",
            "xl",
            Some("/worksheet"),
        )?;
        let sheet_path = sheet_paths
            .get(&r_id)
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet part for '{}'", sheet_name)))?
            .clone();

        let anchors = Self::read_anchors(&mut archive, &sheet_path)?;

        Ok(Self {
            archive,
            sheet_name,
            anchors,
        })
    }

    /// Name of the indexed sheet
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Number of anchored pictures
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Check whether the sheet has no pictures
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Is a picture anchored at this cell?
    pub fn has_picture(&self, addr: CellAddress) -> bool {
        self.anchors.contains_key(&(addr.row, addr.col))
    }

    /// Anchor cells with pictures, in row-major order
    pub fn anchor_cells(&self) -> Vec<CellAddress> {
        let mut cells: Vec<CellAddress> = self
            .anchors
            .keys()
            .map(|&(row, col)| CellAddress::new(row, col))
            .collect();
        cells.sort_by_key(|a| (a.row, a.col));
        cells
    }

    /// Raw embedded bytes of the picture anchored at this cell, in whatever
    /// format the file stores (`None` when no picture is anchored there)
    pub fn picture_bytes(&mut self, addr: CellAddress) -> XlsxResult<Option<Vec<u8>>> {
        let media_path = match self.anchors.get(&(addr.row, addr.col)) {
            Some(p) => p.clone(),
            None => return Ok(None),
        };

        let mut file = self
            .archive
            .by_name(&media_path)
            .map_err(|_| XlsxError::MissingPart(media_path.clone()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    /// Resolve the sheet's drawing parts and collect anchor -> media mappings
    fn read_anchors<RR: Read + Seek>(
        archive: &mut zip::ZipArchive<RR>,
        sheet_path: &str,
    ) -> XlsxResult<HashMap<(u32, u16), String>> {
        let mut anchors = HashMap::new();

        let drawing_ids = Self::read_drawing_refs(archive, sheet_path)?;
        if drawing_ids.is_empty() {
            return Ok(anchors); // No drawing part = no pictures
        }

        let sheet_rels = match package::read_relationships(
            archive,
            &package::rels_path_for(sheet_path),
            package::part_dir(sheet_path),
            Some("/drawing"),
        ) {
            Ok(rels) => rels,
            Err(XlsxError::MissingPart(part)) => {
                log::warn!("sheet references a drawing but {} is missing", part);
                return Ok(anchors);
            }
            Err(e) => return Err(e),
        };

        for drawing_id in drawing_ids {
            let Some(drawing_path) = sheet_rels.get(&drawing_id) else {
                log::warn!("drawing relationship {} not found in sheet rels", drawing_id);
                continue;
            };

            let pictures = Self::read_drawing(archive, drawing_path)?;
            if pictures.is_empty() {
                continue;
            }

            let media_rels = package::read_relationships(
                archive,
                &package::rels_path_for(drawing_path),
                package::part_dir(drawing_path),
                Some("/image"),
            )?;

            for (cell, embed_id) in pictures {
                match media_rels.get(&embed_id) {
                    Some(media_path) => {
                        anchors.insert(cell, media_path.clone());
                    }
                    None => {
                        log::warn!(
                            "picture at row {} col {} references unknown media {}",
                            cell.0,
                            cell.1,
                            embed_id
                        );
                    }
                }
            }
        }

        Ok(anchors)
    }

    /// Collect `<drawing r:id="..."/>` references from a worksheet part
    fn read_drawing_refs<RR: Read + Seek>(
        archive: &mut zip::ZipArchive<RR>,
        sheet_path: &str,
    ) -> XlsxResult<Vec<String>> {
        let file = archive
            .by_name(sheet_path)
            .map_err(|_| XlsxError::MissingPart(sheet_path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut ids = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"drawing" =>
                {
                    for attr in e.attributes().flatten() {
                        if matches!(attr.key.as_ref(), b"r:id" | b"id") {
                            if let Ok(value) = attr.unescape_value() {
                                ids.push(value.to_string());
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(ids)
    }

    /// Parse a drawing part into (anchor cell, blip relationship id) pairs
    ///
    /// Both one-cell and two-cell anchors carry a `<xdr:from>` element with
    /// the top-left cell; that cell is the picture's anchor.
    fn read_drawing<RR: Read + Seek>(
        archive: &mut zip::ZipArchive<RR>,
        drawing_path: &str,
    ) -> XlsxResult<Vec<((u32, u16), String)>> {
        let file = archive
            .by_name(drawing_path)
            .map_err(|_| XlsxError::MissingPart(drawing_path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut pictures = Vec::new();

        let mut in_pic = false;
        let mut in_from = false;
        let mut in_from_col = false;
        let mut in_from_row = false;

        let mut from_col: u16 = 0;
        let mut from_row: u32 = 0;
        let mut current_embed: Option<String> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    match e.local_name().as_ref() {
                        b"pic" => in_pic = true,
                        b"blip" if in_pic => {
                            for attr in e.attributes().flatten() {
                                if matches!(attr.key.as_ref(), b"r:embed" | b"embed") {
                                    if let Ok(value) = attr.unescape_value() {
                                        current_embed = Some(value.to_string());
                                    }
                                }
                            }
                        }
                        b"from" => in_from = true,
                        b"col" if in_from => in_from_col = true,
                        b"row" if in_from => in_from_row = true,
                        _ => {}
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Ok(text) = e.unescape() {
                        let text = text.trim();
                        if in_from_col {
                            from_col = text.parse().unwrap_or(0);
                        } else if in_from_row {
                            from_row = text.parse().unwrap_or(0);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"pic" => {
                        if let Some(embed_id) = current_embed.take() {
                            pictures.push(((from_row, from_col), embed_id));
                        }
                        in_pic = false;
                    }
                    b"from" => in_from = false,
                    b"col" if in_from => in_from_col = false,
                    b"row" if in_from => in_from_row = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(pictures)
    }
}
