use serde_json::{Number, Value};

use crate::alias::{AliasLookup, AliasTable, NormalizedRow, normalize_row};
use crate::error::ValidationError;
use crate::model::{CandidateExcelData, CandidateField, Seniority};
use crate::reader::RawRow;
use crate::utils::normalize_token;

/// Lower bound applied to the years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearsPolicy {
    pub min_years: u32,
}

impl YearsPolicy {
    /// Zero means "no prior experience".
    pub const ALLOW_ZERO: YearsPolicy = YearsPolicy { min_years: 0 };
    /// At least one year of experience.
    pub const POSITIVE: YearsPolicy = YearsPolicy { min_years: 1 };
}

impl Default for YearsPolicy {
    fn default() -> Self {
        YearsPolicy::ALLOW_ZERO
    }
}

/// Turns one raw spreadsheet row into [`CandidateExcelData`].
///
/// Fields are checked in the order seniority, years, availability and the first
/// failure is returned.
#[derive(Debug, Clone, Default)]
pub struct RowValidator {
    aliases: AliasTable,
    years_policy: YearsPolicy,
}

impl RowValidator {
    pub fn new(aliases: AliasTable, years_policy: YearsPolicy) -> Self {
        RowValidator {
            aliases,
            years_policy,
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn years_policy(&self) -> YearsPolicy {
        self.years_policy
    }

    pub fn validate(&self, row: &RawRow) -> Result<CandidateExcelData, ValidationError> {
        let normalized = normalize_row(row);

        let seniority = self.parse_seniority(&normalized)?;
        let years = self.parse_years(&normalized)?;
        let availability = self.parse_availability(&normalized)?;

        Ok(CandidateExcelData {
            seniority,
            years,
            availability,
        })
    }

    fn parse_seniority(&self, row: &NormalizedRow) -> Result<Seniority, ValidationError> {
        let value = match self.aliases.resolve(row, CandidateField::Seniority) {
            AliasLookup::NotFound => {
                return Err(ValidationError::MissingColumn {
                    field: CandidateField::Seniority,
                });
            }
            AliasLookup::Empty(blank) => {
                return Err(ValidationError::InvalidSeniority {
                    value: Some(blank.clone()),
                });
            }
            AliasLookup::Value(value) => value,
        };

        value
            .as_str()
            .and_then(|s| Seniority::from_token(&normalize_token(s)))
            .ok_or_else(|| ValidationError::InvalidSeniority {
                value: Some(value.clone()),
            })
    }

    fn parse_years(&self, row: &NormalizedRow) -> Result<u32, ValidationError> {
        let value = match self.aliases.resolve(row, CandidateField::Years) {
            AliasLookup::NotFound => {
                return Err(ValidationError::MissingColumn {
                    field: CandidateField::Years,
                });
            }
            AliasLookup::Empty(blank) => return Err(self.invalid_years(Some(blank.clone()))),
            AliasLookup::Value(value) => value,
        };

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(years)
                if years.is_finite()
                    && years.fract() == 0.0
                    && years >= f64::from(self.years_policy.min_years)
                    && years <= f64::from(u32::MAX) =>
            {
                Ok(years as u32)
            }
            _ => Err(self.invalid_years(Some(value.clone()))),
        }
    }

    fn parse_availability(&self, row: &NormalizedRow) -> Result<bool, ValidationError> {
        let value = match self.aliases.resolve(row, CandidateField::Availability) {
            AliasLookup::NotFound => {
                return Err(ValidationError::MissingAvailability { value: None });
            }
            AliasLookup::Empty(blank) => {
                return Err(ValidationError::MissingAvailability {
                    value: Some(blank.clone()),
                });
            }
            AliasLookup::Value(value) => value,
        };

        let token = match value {
            Value::Bool(b) => return Ok(*b),
            Value::String(s) => normalize_token(s),
            Value::Number(n) => number_token(n),
            _ => {
                return Err(ValidationError::InvalidAvailability {
                    value: Some(value.clone()),
                });
            }
        };

        if self.aliases.is_true_token(&token) {
            Ok(true)
        } else if self.aliases.is_false_token(&token) {
            Ok(false)
        } else {
            Err(ValidationError::InvalidAvailability {
                value: Some(value.clone()),
            })
        }
    }

    fn invalid_years(&self, value: Option<Value>) -> ValidationError {
        ValidationError::InvalidYears {
            value,
            min_years: self.years_policy.min_years,
        }
    }
}

/// Whole-valued floats match the same tokens as integers (`1.0` reads as `1`).
fn number_token(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}
