//! Minimal SpreadsheetML (.xlsx) reading and writing.
//!
//! The roster and the history log are both plain one-sheet workbooks, so
//! this module keeps the surface small: read every cell of the first
//! worksheet as a string, and write a workbook from rows of typed cells.
//!
//! Written workbooks use inline strings rather than a shared string table,
//! which keeps the part list fixed and lets the reader side round-trip them
//! without extra lookups.

use crate::error::{Error, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Hoja1" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// One cell of a workbook being written.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Numeric cell
    Number(f64),
    /// Inline string cell
    Text(String),
}

impl Cell {
    /// Text cell from anything string-like.
    pub fn text<S: Into<String>>(value: S) -> Self {
        Cell::Text(value.into())
    }
}

/// Read every cell of the first worksheet as a string.
///
/// Numeric cells with no fractional part render without a decimal point, so
/// sequence numbers written as numbers read back as `"3"`, not `"3.0"`.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::Spreadsheet("workbook has no worksheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Serialize a one-sheet workbook to .xlsx bytes.
pub fn workbook_bytes(rows: &[Vec<Cell>]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &str); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", ROOT_RELS_XML),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
    ];
    for (name, xml) in parts {
        writer.start_file(name, options)?;
        writer.write_all(xml.as_bytes())?;
    }

    writer.start_file("xl/worksheets/sheet1.xml", options)?;
    writer.write_all(sheet_xml(rows).as_bytes())?;

    Ok(writer.finish()?.into_inner())
}

/// Write a one-sheet workbook to disk, replacing any existing file.
pub fn write_workbook<P: AsRef<Path>>(path: P, rows: &[Vec<Cell>]) -> Result<()> {
    let bytes = workbook_bytes(rows)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Generate the worksheet part XML.
fn sheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    for (row_idx, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, row_idx + 1));
        for (col_idx, cell) in row.iter().enumerate() {
            let r = cell_ref(row_idx, col_idx);
            match cell {
                Cell::Number(n) if n.fract() == 0.0 => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, r, *n as i64));
                },
                Cell::Number(n) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, r, n));
                },
                Cell::Text(s) => {
                    xml.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        r,
                        escape_xml(s)
                    ));
                },
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// A1-style cell reference from zero-based row and column indices.
fn cell_ref(row_idx: usize, col_idx: usize) -> String {
    let mut letters = String::new();
    let mut n = col_idx;
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("{}{}", letters, row_idx + 1)
}

/// Escape XML special characters.
#[inline]
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Coerce a calamine cell value to a plain string.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
