use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::CandidateError;
use crate::model::{CandidateExcelData, CandidateField};

/// Sheet name of the canonical single-row workbook.
pub const CANONICAL_SHEET_NAME: &str = "candidate";

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const RELS_CONTENT_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";
const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const WORKSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const SHARED_STRINGS_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

/// A cell written with its native spreadsheet type.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }
}

/// Event writer for one XML part of the package.
struct XmlPart {
    xml: Writer<Vec<u8>>,
}

impl XmlPart {
    fn new() -> Result<Self, CandidateError> {
        let mut part = XmlPart {
            xml: Writer::new(Vec::new()),
        };
        part.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), CandidateError> {
        self.xml
            .write_event(event)
            .map_err(CandidateError::write_failed)
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), CandidateError> {
        self.write(Event::Start(element))
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<(), CandidateError> {
        self.write(Event::Empty(element))
    }

    fn text(&mut self, text: &str) -> Result<(), CandidateError> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn end(&mut self, name: &str) -> Result<(), CandidateError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>`
    fn text_element(&mut self, element: BytesStart<'_>, text: &str) -> Result<(), CandidateError> {
        let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        self.start(element)?;
        self.text(text)?;
        self.end(&name)
    }

    fn into_inner(self) -> Vec<u8> {
        self.xml.into_inner()
    }
}

/// Minimal OOXML workbook writer: named sheets of typed cells, strings stored in
/// the shared string table.
#[derive(Debug, Clone, Default)]
pub struct WorkbookWriter {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> &mut Self {
        self.sheets.push((name.into(), rows));
        self
    }

    /// Serialize the workbook into an in-memory `.xlsx` buffer.
    pub fn write(&self) -> Result<Vec<u8>, CandidateError> {
        let shared_strings = self.collect_shared_strings();

        let mut parts: Vec<(String, Vec<u8>)> = vec![
            (
                "[Content_Types].xml".to_string(),
                self.content_types_xml(&shared_strings)?,
            ),
            ("_rels/.rels".to_string(), root_rels_xml()?),
            ("xl/workbook.xml".to_string(), self.workbook_xml()?),
            (
                "xl/_rels/workbook.xml.rels".to_string(),
                self.workbook_rels_xml(&shared_strings)?,
            ),
        ];
        for (index, (_, rows)) in self.sheets.iter().enumerate() {
            parts.push((
                format!("xl/worksheets/sheet{}.xml", index + 1),
                sheet_xml(rows, &shared_strings)?,
            ));
        }
        if !shared_strings.is_empty() {
            parts.push((
                "xl/sharedStrings.xml".to_string(),
                shared_strings_xml(&shared_strings)?,
            ));
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in parts {
            zip.start_file(name, options)
                .map_err(CandidateError::write_failed)?;
            zip.write_all(&content)
                .map_err(CandidateError::write_failed)?;
        }
        let cursor = zip.finish().map_err(CandidateError::write_failed)?;

        Ok(cursor.into_inner())
    }

    fn collect_shared_strings(&self) -> Vec<String> {
        let mut strings: Vec<String> = Vec::new();
        for (_, rows) in &self.sheets {
            for cell in rows.iter().flatten() {
                if let CellValue::Text(text) = cell {
                    if !strings.contains(text) {
                        strings.push(text.clone());
                    }
                }
            }
        }
        strings
    }

    fn content_types_xml(&self, shared_strings: &[String]) -> Result<Vec<u8>, CandidateError> {
        let mut part = XmlPart::new()?;
        part.start(BytesStart::new("Types").with_attributes([("xmlns", CONTENT_TYPES_NS)]))?;
        part.empty(
            BytesStart::new("Default")
                .with_attributes([("Extension", "rels"), ("ContentType", RELS_CONTENT_TYPE)]),
        )?;
        part.empty(
            BytesStart::new("Default")
                .with_attributes([("Extension", "xml"), ("ContentType", "application/xml")]),
        )?;
        part.empty(BytesStart::new("Override").with_attributes([
            ("PartName", "/xl/workbook.xml"),
            ("ContentType", WORKBOOK_CONTENT_TYPE),
        ]))?;
        for index in 1..=self.sheets.len() {
            let part_name = format!("/xl/worksheets/sheet{index}.xml");
            part.empty(BytesStart::new("Override").with_attributes([
                ("PartName", part_name.as_str()),
                ("ContentType", WORKSHEET_CONTENT_TYPE),
            ]))?;
        }
        if !shared_strings.is_empty() {
            part.empty(BytesStart::new("Override").with_attributes([
                ("PartName", "/xl/sharedStrings.xml"),
                ("ContentType", SHARED_STRINGS_CONTENT_TYPE),
            ]))?;
        }
        part.end("Types")?;
        Ok(part.into_inner())
    }

    fn workbook_xml(&self) -> Result<Vec<u8>, CandidateError> {
        let mut part = XmlPart::new()?;
        part.start(
            BytesStart::new("workbook").with_attributes([("xmlns", MAIN_NS), ("xmlns:r", REL_NS)]),
        )?;
        part.start(BytesStart::new("sheets"))?;
        for (index, (name, _)) in self.sheets.iter().enumerate() {
            let sheet_id = (index + 1).to_string();
            let rel_id = format!("rId{sheet_id}");
            part.empty(BytesStart::new("sheet").with_attributes([
                ("name", name.as_str()),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ]))?;
        }
        part.end("sheets")?;
        part.end("workbook")?;
        Ok(part.into_inner())
    }

    fn workbook_rels_xml(&self, shared_strings: &[String]) -> Result<Vec<u8>, CandidateError> {
        let worksheet_type = format!("{REL_NS}/worksheet");
        let mut part = XmlPart::new()?;
        part.start(BytesStart::new("Relationships").with_attributes([("xmlns", PACKAGE_REL_NS)]))?;
        for index in 1..=self.sheets.len() {
            let rel_id = format!("rId{index}");
            let target = format!("worksheets/sheet{index}.xml");
            part.empty(BytesStart::new("Relationship").with_attributes([
                ("Id", rel_id.as_str()),
                ("Type", worksheet_type.as_str()),
                ("Target", target.as_str()),
            ]))?;
        }
        if !shared_strings.is_empty() {
            let rel_id = format!("rId{}", self.sheets.len() + 1);
            let shared_strings_type = format!("{REL_NS}/sharedStrings");
            part.empty(BytesStart::new("Relationship").with_attributes([
                ("Id", rel_id.as_str()),
                ("Type", shared_strings_type.as_str()),
                ("Target", "sharedStrings.xml"),
            ]))?;
        }
        part.end("Relationships")?;
        Ok(part.into_inner())
    }
}

/// Serialize validated candidate data into the canonical workbook: one sheet, the
/// fixed header `seniority, years, availability` and a single data row.
pub fn write_candidate(data: &CandidateExcelData) -> Result<Vec<u8>, CandidateError> {
    let header: Vec<CellValue> = CandidateField::ALL
        .iter()
        .map(|field| CellValue::text(field.as_str()))
        .collect();
    let values = vec![
        CellValue::text(data.seniority.as_str()),
        CellValue::Number(f64::from(data.years)),
        CellValue::Bool(data.availability),
    ];

    WorkbookWriter::new()
        .add_sheet(CANONICAL_SHEET_NAME, vec![header, values])
        .write()
}

fn root_rels_xml() -> Result<Vec<u8>, CandidateError> {
    let office_document_type = format!("{REL_NS}/officeDocument");
    let mut part = XmlPart::new()?;
    part.start(BytesStart::new("Relationships").with_attributes([("xmlns", PACKAGE_REL_NS)]))?;
    part.empty(BytesStart::new("Relationship").with_attributes([
        ("Id", "rId1"),
        ("Type", office_document_type.as_str()),
        ("Target", "xl/workbook.xml"),
    ]))?;
    part.end("Relationships")?;
    Ok(part.into_inner())
}

fn sheet_xml(
    rows: &[Vec<CellValue>],
    shared_strings: &[String],
) -> Result<Vec<u8>, CandidateError> {
    let mut part = XmlPart::new()?;
    part.start(
        BytesStart::new("worksheet").with_attributes([("xmlns", MAIN_NS), ("xmlns:r", REL_NS)]),
    )?;

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width > 0 {
        let dimension = format!("A1:{}{}", column_name(width - 1), rows.len());
        part.empty(BytesStart::new("dimension").with_attributes([("ref", dimension.as_str())]))?;
    }

    part.start(BytesStart::new("sheetData"))?;
    for (row_index, row) in rows.iter().enumerate() {
        let row_number = (row_index + 1).to_string();
        part.start(BytesStart::new("row").with_attributes([("r", row_number.as_str())]))?;
        for (col_index, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_name(col_index), row_number);
            let (cell_type, value) = match cell {
                CellValue::Empty => continue,
                CellValue::Text(text) => {
                    // Every text cell is in the table
                    let index = shared_strings
                        .iter()
                        .position(|s| s == text)
                        .unwrap_or_default();
                    (Some("s"), index.to_string())
                }
                CellValue::Number(n) if n.is_finite() => (None, n.to_string()),
                CellValue::Number(_) => continue,
                CellValue::Bool(b) => (Some("b"), u8::from(*b).to_string()),
            };

            let mut element = BytesStart::new("c");
            element.push_attribute(("r", reference.as_str()));
            if let Some(cell_type) = cell_type {
                element.push_attribute(("t", cell_type));
            }
            part.start(element)?;
            part.text_element(BytesStart::new("v"), &value)?;
            part.end("c")?;
        }
        part.end("row")?;
    }
    part.end("sheetData")?;
    part.end("worksheet")?;
    Ok(part.into_inner())
}

fn shared_strings_xml(shared_strings: &[String]) -> Result<Vec<u8>, CandidateError> {
    let count = shared_strings.len().to_string();
    let mut part = XmlPart::new()?;
    part.start(BytesStart::new("sst").with_attributes([
        ("xmlns", MAIN_NS),
        ("count", count.as_str()),
        ("uniqueCount", count.as_str()),
    ]))?;
    for text in shared_strings {
        part.start(BytesStart::new("si"))?;
        part.text_element(
            BytesStart::new("t").with_attributes([("xml:space", "preserve")]),
            text,
        )?;
        part.end("si")?;
    }
    part.end("sst")?;
    Ok(part.into_inner())
}

/// Zero-based column index to spreadsheet letters (0 -> A, 26 -> AA).
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}
