// Test utilities available to both unit and integration tests
// Only compiled when testing

use serde_json::Value;

use crate::writer::{CellValue, WorkbookWriter};

/// Builder for in-memory `.xlsx` fixtures with arbitrary sheets and cells
#[derive(Debug, Clone, Default)]
pub struct WorkbookFixture {
    writer: WorkbookWriter,
}

impl WorkbookFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbook with a single sheet named `Sheet1`
    pub fn single_sheet(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new().sheet("Sheet1", rows)
    }

    /// Workbook whose sheet list is empty
    pub fn without_sheets() -> Self {
        Self::new()
    }

    pub fn sheet(mut self, name: &str, rows: Vec<Vec<CellValue>>) -> Self {
        self.writer.add_sheet(name, rows);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.writer.write().unwrap()
    }
}

/// A row of text cells, typically a header row
pub fn cell_row(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::text(*v)).collect()
}

/// Convert a JSON value into the cell type a spreadsheet would store
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => CellValue::Number(n.as_f64().unwrap()),
        Value::String(s) => CellValue::text(s.clone()),
        other => CellValue::text(other.to_string()),
    }
}

/// Single-sheet workbook with one header row and one data row
pub fn candidate_workbook(headers: &[&str], values: &[Value]) -> Vec<u8> {
    candidate_workbook_rows(headers, &[values.to_vec()])
}

/// Single-sheet workbook with one header row and any number of data rows
pub fn candidate_workbook_rows(headers: &[&str], rows: &[Vec<Value>]) -> Vec<u8> {
    let mut sheet = vec![cell_row(headers)];
    sheet.extend(
        rows.iter()
            .map(|row| row.iter().map(json_to_cell).collect::<Vec<_>>()),
    );
    WorkbookFixture::single_sheet(sheet).to_bytes()
}

/// The canonical valid row: junior, 5 years, available
pub fn default_candidate_workbook() -> Vec<u8> {
    candidate_workbook(
        &["seniority", "years", "availability"],
        &[
            Value::String("junior".to_string()),
            Value::from(5),
            Value::Bool(true),
        ],
    )
}
