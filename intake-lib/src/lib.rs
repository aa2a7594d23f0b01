#![allow(clippy::needless_return)]

pub mod alias;
pub mod error;
pub mod model;
pub mod parser;
pub mod reader;
pub mod utils;
pub mod validator;
pub mod writer;

// Test utilities - only compiled when testing or with test feature
// #[cfg(test)] alone doesn't work for integration tests (they're external crates)
// The feature flag makes it available to integration tests via dev-dependencies
#[cfg(any(test, feature = "test"))]
pub mod test_utils;

pub use alias::{AliasLookup, AliasTable, AliasTableConfig, AliasTableError};
pub use error::{CandidateError, CandidateErrorKind, ValidationError};
pub use model::{
    CandidateExcelData, CandidateField, CandidateRecord, IdentityFields, Seniority, assemble,
};
pub use parser::{
    ExcelCandidateParseResult, ExcelCandidateParser, ExcelCandidateParserBuilder, UploadedFile,
};
pub use reader::read_rows;
pub use validator::{RowValidator, YearsPolicy};
pub use writer::write_candidate;

pub const ERRORS_LOG_FILE: &str = "errors.log";
