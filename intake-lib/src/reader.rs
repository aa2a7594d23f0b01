use calamine::{Data, Reader, Xlsx};
use serde_json::{Map, Value, json};
use std::io::Cursor;

use crate::alias::is_blank_value;
use crate::error::CandidateError;

/// A decoded data row keyed by its raw header text, in column order.
///
/// Empty cells are kept as `Value::Null` so that a present-but-blank column can be
/// told apart from a missing one.
pub type RawRow = Map<String, Value>;

/// Type alias for a parsed Excel row with its 1-based sheet row number
pub type ParsedExcelRow = (usize, RawRow);

/// Decode the first sheet of an OOXML workbook into data rows.
///
/// The first non-empty row of the sheet is the header row. Rows are returned top
/// to bottom; rows whose cells are all blank are skipped.
pub fn read_rows(buffer: &[u8]) -> Result<Vec<ParsedExcelRow>, CandidateError> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(buffer)).map_err(CandidateError::unexpected)?;

    let sheet_names = workbook.sheet_names();
    let Some(first_sheet) = sheet_names.first() else {
        return Err(CandidateError::NoSheets);
    };

    let range = workbook
        .worksheet_range(first_sheet)
        .map_err(CandidateError::unexpected)?;
    let first_row_number = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut headers: Vec<Option<String>> = Vec::new();
    let mut parsed_rows: Vec<ParsedExcelRow> = Vec::new();

    for (row_index, row) in range.rows().enumerate() {
        if row_index == 0 {
            // Blank header cells leave their column unnamed
            headers = row
                .iter()
                .map(|cell| {
                    let header = cell.to_string();
                    if header.trim().is_empty() {
                        None
                    } else {
                        Some(header)
                    }
                })
                .collect();
            continue;
        }

        let mut raw_row = RawRow::new();
        for (cell, header) in row.iter().zip(headers.iter()) {
            let Some(header) = header else {
                continue;
            };
            let value = convert_cell_to_json(cell);
            match raw_row.get(header) {
                Some(existing) if !is_blank_value(existing) => {}
                _ => {
                    raw_row.insert(header.clone(), value);
                }
            }
        }

        if raw_row.values().all(is_blank_value) {
            continue;
        }

        parsed_rows.push((first_row_number + row_index + 1, raw_row));
    }

    if parsed_rows.is_empty() {
        return Err(CandidateError::NoRows);
    }

    Ok(parsed_rows)
}

/// Convert a calamine cell into its native JSON type.
pub fn convert_cell_to_json(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => convert_float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => convert_float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

fn convert_float(f: f64) -> Value {
    if f.is_nan() || f.is_infinite() {
        return Value::Null;
    }

    // Whole numbers come back from Excel as floats
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        json!(f as i64)
    } else {
        json!(f)
    }
}
