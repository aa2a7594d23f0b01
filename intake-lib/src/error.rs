use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::model::CandidateField;

/// Render a raw cell value for error messages.
///
/// Strings are quoted, numbers/booleans/objects are rendered as JSON, an empty
/// cell is `null` and a value that was never found is `undefined`.
pub fn describe_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => format!("\"{}\"", s),
        Some(other) => other.to_string(),
    }
}

/// Non-text seniority cells get their own wording; the error kind is the same.
fn seniority_message(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(_)) | Some(Value::Null) | None => format!(
            "Column \"seniority\" must be \"junior\" or \"senior\". Received: {}.",
            describe_value(value)
        ),
        Some(_) => format!(
            "Column \"seniority\" must be a string. Received: {}.",
            describe_value(value)
        ),
    }
}

/// Row-level failures produced by the row validator.
///
/// Only the first invalid field is ever reported, in the fixed order
/// seniority, years, availability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required column \"{field}\" is missing")]
    MissingColumn { field: CandidateField },

    #[error("{}", seniority_message(.value.as_ref()))]
    InvalidSeniority { value: Option<Value> },

    #[error(
        "Column \"years\" must be an integer greater than or equal to {min_years}. Received: {}.",
        describe_value(.value.as_ref())
    )]
    InvalidYears { value: Option<Value>, min_years: u32 },

    #[error("Column \"availability\" is required. Received: {}.", describe_value(.value.as_ref()))]
    MissingAvailability { value: Option<Value> },

    #[error(
        "Column \"availability\" must be boolean (\"true\"/\"false\"). Received: {}.",
        describe_value(.value.as_ref())
    )]
    InvalidAvailability { value: Option<Value> },
}

/// Every failure the engine can surface, through a single error channel.
#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("Excel file does not contain sheets")]
    NoSheets,

    #[error("Excel file does not contain rows")]
    NoRows,

    #[error(
        "Excel file must contain exactly one data row, found {rows} (first extra data at row {first_extra_row})"
    )]
    TooManyRows { rows: usize, first_extra_row: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Uploaded file could not be read: {message}")]
    FileRead {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Unable to process Excel file: {message}")]
    UnexpectedProcessing { message: String },

    #[error("Unable to write Excel file: {message}")]
    SpreadsheetWrite { message: String },
}

/// Stable, machine-readable identifier for a [`CandidateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateErrorKind {
    NoSheets,
    NoRows,
    TooManyRows,
    MissingColumn,
    InvalidSeniority,
    InvalidYears,
    MissingAvailability,
    InvalidAvailability,
    FileRead,
    UnexpectedProcessing,
    SpreadsheetWrite,
}

impl CandidateErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateErrorKind::NoSheets => "no_sheets",
            CandidateErrorKind::NoRows => "no_rows",
            CandidateErrorKind::TooManyRows => "too_many_rows",
            CandidateErrorKind::MissingColumn => "missing_column",
            CandidateErrorKind::InvalidSeniority => "invalid_seniority",
            CandidateErrorKind::InvalidYears => "invalid_years",
            CandidateErrorKind::MissingAvailability => "missing_availability",
            CandidateErrorKind::InvalidAvailability => "invalid_availability",
            CandidateErrorKind::FileRead => "file_read",
            CandidateErrorKind::UnexpectedProcessing => "unexpected_processing",
            CandidateErrorKind::SpreadsheetWrite => "spreadsheet_write",
        }
    }
}

impl fmt::Display for CandidateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError {
    pub fn kind(&self) -> CandidateErrorKind {
        match self {
            ValidationError::MissingColumn { .. } => CandidateErrorKind::MissingColumn,
            ValidationError::InvalidSeniority { .. } => CandidateErrorKind::InvalidSeniority,
            ValidationError::InvalidYears { .. } => CandidateErrorKind::InvalidYears,
            ValidationError::MissingAvailability { .. } => CandidateErrorKind::MissingAvailability,
            ValidationError::InvalidAvailability { .. } => CandidateErrorKind::InvalidAvailability,
        }
    }
}

impl CandidateError {
    pub fn kind(&self) -> CandidateErrorKind {
        match self {
            CandidateError::NoSheets => CandidateErrorKind::NoSheets,
            CandidateError::NoRows => CandidateErrorKind::NoRows,
            CandidateError::TooManyRows { .. } => CandidateErrorKind::TooManyRows,
            CandidateError::Validation(err) => err.kind(),
            CandidateError::FileRead { .. } => CandidateErrorKind::FileRead,
            CandidateError::UnexpectedProcessing { .. } => CandidateErrorKind::UnexpectedProcessing,
            CandidateError::SpreadsheetWrite { .. } => CandidateErrorKind::SpreadsheetWrite,
        }
    }

    /// True when the failure is caused by the uploaded content rather than by
    /// infrastructure.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            CandidateError::FileRead { .. }
                | CandidateError::UnexpectedProcessing { .. }
                | CandidateError::SpreadsheetWrite { .. }
        )
    }

    pub(crate) fn file_has_no_data() -> Self {
        CandidateError::FileRead {
            message: "Uploaded file has no data".to_string(),
            source: None,
        }
    }

    pub(crate) fn unexpected(err: impl fmt::Display) -> Self {
        CandidateError::UnexpectedProcessing {
            message: err.to_string(),
        }
    }

    pub(crate) fn write_failed(err: impl fmt::Display) -> Self {
        CandidateError::SpreadsheetWrite {
            message: err.to_string(),
        }
    }
}
