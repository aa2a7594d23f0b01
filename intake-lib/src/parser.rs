use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::alias::AliasTable;
use crate::error::CandidateError;
use crate::model::{CandidateExcelData, CandidateRecord, IdentityFields, assemble};
use crate::reader::{ParsedExcelRow, RawRow, read_rows};
use crate::validator::{RowValidator, YearsPolicy};
use crate::writer::write_candidate;

/// An uploaded spreadsheet as handed over by the transport layer: either the
/// bytes are already in memory or they were spooled to a temporary file.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub buffer: Option<Vec<u8>>,
    pub path: Option<PathBuf>,
}

impl UploadedFile {
    pub fn from_bytes(buffer: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            buffer: Some(buffer.into()),
            path: None,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        UploadedFile {
            buffer: None,
            path: Some(path.into()),
        }
    }

    /// Non-empty in-memory content wins, then the path; neither is a
    /// [`CandidateError::FileRead`].
    pub fn read(&self) -> Result<Cow<'_, [u8]>, CandidateError> {
        if let Some(buffer) = self.buffer.as_deref().filter(|b| !b.is_empty()) {
            return Ok(Cow::Borrowed(buffer));
        }

        match self.path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => read_from_disk(path).map(Cow::Owned),
            None => Err(CandidateError::file_has_no_data()),
        }
    }
}

fn read_from_disk(path: &Path) -> Result<Vec<u8>, CandidateError> {
    std::fs::read(path).map_err(|err| CandidateError::FileRead {
        message: format!("{}: {}", path.display(), err),
        source: Some(err),
    })
}

/// Validated data together with the canonical workbook to forward downstream.
#[derive(Debug, Clone)]
pub struct ExcelCandidateParseResult {
    pub excel_data: CandidateExcelData,
    pub normalized_file: Vec<u8>,
}

/// Require exactly one data row and hand it back.
pub fn ensure_single_data_row(rows: &[ParsedExcelRow]) -> Result<&RawRow, CandidateError> {
    match rows {
        [] => Err(CandidateError::NoRows),
        [(_, row)] => Ok(row),
        [_, (first_extra_row, _), ..] => Err(CandidateError::TooManyRows {
            rows: rows.len(),
            first_extra_row: *first_extra_row,
        }),
    }
}

/// Spreadsheet-to-candidate pipeline: read, check the row count, validate.
#[derive(Debug, Clone, Default)]
pub struct ExcelCandidateParser {
    validator: RowValidator,
}

pub struct ExcelCandidateParserBuilder {
    aliases: AliasTable,
    years_policy: YearsPolicy,
}

impl Default for ExcelCandidateParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelCandidateParserBuilder {
    /// Start from the client alias table and a zero-inclusive years policy.
    pub fn new() -> Self {
        ExcelCandidateParserBuilder {
            aliases: AliasTable::default(),
            years_policy: YearsPolicy::default(),
        }
    }

    pub fn aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn years_policy(mut self, years_policy: YearsPolicy) -> Self {
        self.years_policy = years_policy;
        self
    }

    pub fn min_years(mut self, min_years: u32) -> Self {
        self.years_policy = YearsPolicy { min_years };
        self
    }

    pub fn build(self) -> ExcelCandidateParser {
        ExcelCandidateParser {
            validator: RowValidator::new(self.aliases, self.years_policy),
        }
    }
}

impl ExcelCandidateParser {
    pub fn builder() -> ExcelCandidateParserBuilder {
        ExcelCandidateParserBuilder::new()
    }

    pub fn validator(&self) -> &RowValidator {
        &self.validator
    }

    /// Parse an in-memory `.xlsx` buffer into validated candidate data.
    pub fn parse_bytes(&self, buffer: &[u8]) -> Result<CandidateExcelData, CandidateError> {
        let rows = read_rows(buffer)?;
        let row = ensure_single_data_row(&rows)?;
        Ok(self.validator.validate(row)?)
    }

    pub fn parse_upload(&self, file: &UploadedFile) -> Result<CandidateExcelData, CandidateError> {
        let buffer = file.read()?;
        self.parse_bytes(&buffer)
    }

    /// Parse the upload and merge it with the caller's identity fields.
    pub fn parse_candidate(
        &self,
        identity: IdentityFields,
        file: &UploadedFile,
    ) -> Result<CandidateRecord, CandidateError> {
        let excel_data = self.parse_upload(file)?;
        Ok(assemble(identity, excel_data))
    }

    /// Parse the upload and re-serialize it as the canonical single-row workbook.
    pub fn parse_and_normalize(
        &self,
        file: &UploadedFile,
    ) -> Result<ExcelCandidateParseResult, CandidateError> {
        let excel_data = self.parse_upload(file)?;
        let normalized_file = write_candidate(&excel_data)?;
        Ok(ExcelCandidateParseResult {
            excel_data,
            normalized_file,
        })
    }
}
