use intake_lib::{CandidateError, ExcelCandidateParser, UploadedFile};
use serde_json::Value;

// Re-export shared test utilities from src/test_utils.rs
pub use intake_lib::test_utils::{
    WorkbookFixture, candidate_workbook, candidate_workbook_rows, cell_row,
    default_candidate_workbook,
};

/// Canonical headers in writer order
#[allow(dead_code)]
pub const CANONICAL_HEADERS: [&str; 3] = ["seniority", "years", "availability"];

/// Parse a one-row workbook built from headers and values with the default parser
#[allow(dead_code)]
pub fn parse_row(
    headers: &[&str],
    values: &[Value],
) -> Result<intake_lib::CandidateExcelData, CandidateError> {
    parse_row_with(&ExcelCandidateParser::default(), headers, values)
}

/// Parse a one-row workbook with a specific parser configuration
#[allow(dead_code)]
pub fn parse_row_with(
    parser: &ExcelCandidateParser,
    headers: &[&str],
    values: &[Value],
) -> Result<intake_lib::CandidateExcelData, CandidateError> {
    let buffer = candidate_workbook(headers, values);
    parser.parse_upload(&UploadedFile::from_bytes(buffer))
}
