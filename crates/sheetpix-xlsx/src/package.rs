//! Shared package-level parsing helpers
//!
//! Both the value reader and the picture index need the workbook part and
//! relationship graph; the event-loop parsers for those live here.

use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// Verify the archive looks like an XLSX package
pub(crate) fn check_package<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<()> {
    if archive.by_name("[Content_Types].xml").is_err() {
        return Err(XlsxError::InvalidFormat(
            "Missing [Content_Types].xml".into(),
        ));
    }
    Ok(())
}

/// Read workbook.xml to get sheet names and rIds, in declaration order
pub(crate) fn read_workbook_xml<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> XlsxResult<Vec<(String, String)>> {
    let file = archive
        .by_name("xl/workbook.xml")
        .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut r_id = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => {
                            name = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"r:id" => {
                            r_id = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        _ => {}
                    }
                }

                if let (Some(name), Some(r_id)) = (name, r_id) {
                    sheets.push((name, r_id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Read a relationships part into an rId -> resolved-target map
///
/// `base_dir` is the directory of the part that owns the relationships
/// (e.g. "xl" for workbook.xml.rels); targets are resolved against it.
/// When `type_suffix` is given, only relationships whose Type ends with it
/// are kept (e.g. "/worksheet", "/drawing", "/image").
pub(crate) fn read_relationships<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    rels_path: &str,
    base_dir: &str,
    type_suffix: Option<&str>,
) -> XlsxResult<HashMap<String, String>> {
    let file = archive
        .by_name(rels_path)
        .map_err(|_| XlsxError::MissingPart(rels_path.to_string()))?;

    let reader = BufReader::new(file);
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => {
                            id = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"Target" => {
                            target = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        b"Type" => {
                            rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                        }
                        _ => {}
                    }
                }

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    let keep = match type_suffix {
                        Some(suffix) => rel_type.ends_with(suffix),
                        None => true,
                    };
                    if keep {
                        rels.insert(id, resolve_target(base_dir, &target));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Resolve a relationship target against the owning part's directory
///
/// Handles package-absolute targets ("/xl/media/image1.png") and relative
/// ones with parent segments ("../media/image1.png").
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for seg in target.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// The relationships part belonging to a package part
/// ("xl/worksheets/sheet1.xml" -> "xl/worksheets/_rels/sheet1.xml.rels")
pub(crate) fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Directory of a package part ("xl/worksheets/sheet1.xml" -> "xl/worksheets")
pub(crate) fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}
