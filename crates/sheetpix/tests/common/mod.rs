//! Fixture workbooks assembled in memory for extraction tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A small solid-color PNG, valid for the decode paths.
pub fn png_bytes(r: u8, g: u8, b: u8) -> Vec<u8> {
    encode(ImageFormat::Png, r, g, b)
}

/// A small solid-color JPEG, for re-encode coverage.
pub fn jpeg_bytes(r: u8, g: u8, b: u8) -> Vec<u8> {
    encode(ImageFormat::Jpeg, r, g, b)
}

fn encode(format: ImageFormat, r: u8, g: u8, b: u8) -> Vec<u8> {
    let img = RgbaImage::from_pixel(2, 2, Rgba([r, g, b, 255]));
    let img = match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(img).to_rgb8().into(),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// Build a ZIP package from raw (name, bytes) parts.
pub fn zip_bytes(parts: &[(String, Vec<u8>)]) -> Vec<u8> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = ZipWriter::new(cursor);
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Stored);

    for (name, bytes) in parts {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(bytes).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// One cell in a fixture sheet.
pub enum Cell {
    Number(&'static str, f64),
    Str(&'static str, &'static str),
    Bool(&'static str, bool),
    /// `<c r=".."/>` - defined but valueless
    Blank(&'static str),
}

impl Cell {
    fn to_xml(&self) -> String {
        match self {
            Cell::Number(r, n) => format!(r#"<c r="{}"><v>{}</v></c>"#, r, n),
            Cell::Str(r, s) => {
                format!(r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#, r, s)
            }
            Cell::Bool(r, b) => {
                format!(r#"<c r="{}" t="b"><v>{}</v></c>"#, r, if *b { 1 } else { 0 })
            }
            Cell::Blank(r) => format!(r#"<c r="{}"/>"#, r),
        }
    }

    fn row(&self) -> u32 {
        let r = match self {
            Cell::Number(r, _) | Cell::Str(r, _) | Cell::Bool(r, _) | Cell::Blank(r) => r,
        };
        r.trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .unwrap()
    }
}

/// A picture anchored on a fixture sheet.
pub struct Picture {
    pub row: u32,
    pub col: u16,
    pub bytes: Vec<u8>,
    pub ext: &'static str,
}

#[derive(Default)]
pub struct Sheet {
    pub name: String,
    pub cells: Vec<Cell>,
    pub pictures: Vec<Picture>,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: Vec::new(),
            pictures: Vec::new(),
        }
    }

    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn picture(mut self, row: u32, col: u16, bytes: Vec<u8>, ext: &'static str) -> Self {
        self.pictures.push(Picture {
            row,
            col,
            bytes,
            ext,
        });
        self
    }

    fn sheet_data_xml(&self) -> String {
        let mut rows: Vec<(u32, Vec<&Cell>)> = Vec::new();
        for cell in &self.cells {
            let r = cell.row();
            match rows.iter_mut().find(|(row, _)| *row == r) {
                Some((_, cells)) => cells.push(cell),
                None => rows.push((r, vec![cell])),
            }
        }
        rows.sort_by_key(|(r, _)| *r);

        let mut xml = String::from("<sheetData>");
        for (r, cells) in rows {
            xml.push_str(&format!(r#"<row r="{}">"#, r));
            for cell in cells {
                xml.push_str(&cell.to_xml());
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");
        xml
    }
}

/// Assemble a complete XLSX package.
pub fn build_workbook(sheets: &[Sheet]) -> Vec<u8> {
    let mut parts: Vec<(String, Vec<u8>)> = Vec::new();
    let mut media_exts: Vec<&'static str> = Vec::new();
    let mut media_count = 0usize;

    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut workbook_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            sheet.name, n, n
        ));
        workbook_rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, n
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    workbook_rels.push_str("</Relationships>");

    parts.push(("xl/workbook.xml".into(), workbook_xml.into_bytes()));
    parts.push((
        "xl/_rels/workbook.xml.rels".into(),
        workbook_rels.into_bytes(),
    ));

    for (i, sheet) in sheets.iter().enumerate() {
        let n = i + 1;
        let drawing_ref = if sheet.pictures.is_empty() {
            String::new()
        } else {
            r#"<drawing r:id="rId1"/>"#.to_string()
        };

        let sheet_xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">{}{}</worksheet>"#,
            sheet.sheet_data_xml(),
            drawing_ref
        );
        parts.push((format!("xl/worksheets/sheet{}.xml", n), sheet_xml.into_bytes()));

        if sheet.pictures.is_empty() {
            continue;
        }

        parts.push((
            format!("xl/worksheets/_rels/sheet{}.xml.rels", n),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing" Target="../drawings/drawing{}.xml"/></Relationships>"#,
                n
            )
            .into_bytes(),
        ));

        let mut drawing_xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );
        let mut drawing_rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for (p, picture) in sheet.pictures.iter().enumerate() {
            media_count += 1;
            if !media_exts.contains(&picture.ext) {
                media_exts.push(picture.ext);
            }
            let media_name = format!("image{}.{}", media_count, picture.ext);

            drawing_xml.push_str(&format!(
                r#"<xdr:oneCellAnchor><xdr:from><xdr:col>{col}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{row}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from><xdr:ext cx="914400" cy="914400"/><xdr:pic><xdr:nvPicPr><xdr:cNvPr id="{id}" name="Picture {id}"/><xdr:cNvPicPr/></xdr:nvPicPr><xdr:blipFill><a:blip r:embed="rId{rid}"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill><xdr:spPr/></xdr:pic><xdr:clientData/></xdr:oneCellAnchor>"#,
                col = picture.col,
                row = picture.row,
                id = p + 1,
                rid = p + 1,
            ));
            drawing_rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
                p + 1,
                media_name
            ));

            parts.push((format!("xl/media/{}", media_name), picture.bytes.clone()));
        }

        drawing_xml.push_str("</xdr:wsDr>");
        drawing_rels.push_str("</Relationships>");

        parts.push((format!("xl/drawings/drawing{}.xml", n), drawing_xml.into_bytes()));
        parts.push((
            format!("xl/drawings/_rels/drawing{}.xml.rels", n),
            drawing_rels.into_bytes(),
        ));
    }

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
    );
    for ext in media_exts {
        content_types.push_str(&format!(
            r#"<Default Extension="{}" ContentType="image/{}"/>"#,
            ext, ext
        ));
    }
    content_types.push_str(
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#,
    );
    parts.insert(0, ("[Content_Types].xml".into(), content_types.into_bytes()));

    zip_bytes(&parts)
}

/// Write a fixture package into a directory and return its path.
pub fn write_fixture(dir: &Path, name: &str, sheets: &[Sheet]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_workbook(sheets)).unwrap();
    path
}
