use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use crate::model::CandidateField;
use crate::utils::{is_blank, normalize_header, normalize_token};

/// A row whose keys went through [`normalize_header`].
pub type NormalizedRow = Map<String, Value>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AliasTableError {
    #[error("No header aliases registered for column \"{field}\"")]
    NoAliases { field: CandidateField },

    #[error("Blank alias registered for {context}")]
    BlankAlias { context: String },

    #[error("Availability tokens registered as both true and false: {tokens:?}")]
    OverlappingAvailabilityTokens { tokens: Vec<String> },
}

/// Result of looking a field up through its aliases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AliasLookup<'a> {
    /// No alias key is present in the row.
    NotFound,
    /// At least one alias key is present, but every such cell is blank; carries
    /// the first blank cell as read.
    Empty(&'a Value),
    /// First non-blank value, in alias registration order.
    Value(&'a Value),
}

/// Serialized form of an [`AliasTable`], as read from a JSON configuration file.
///
/// Entries may use natural spellings; they are normalized when the table is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AliasTableConfig {
    pub seniority: Vec<String>,
    pub years: Vec<String>,
    pub availability: Vec<String>,
    pub availability_true: Vec<String>,
    pub availability_false: Vec<String>,
}

/// Accepted header spellings per field and accepted availability tokens.
///
/// Immutable once built; the true and false token sets never overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    seniority: Vec<String>,
    years: Vec<String>,
    availability: Vec<String>,
    availability_true: Vec<String>,
    availability_false: Vec<String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::client()
    }
}

impl TryFrom<AliasTableConfig> for AliasTable {
    type Error = AliasTableError;

    fn try_from(config: AliasTableConfig) -> Result<Self, Self::Error> {
        AliasTable::new(config)
    }
}

impl AliasTable {
    pub fn new(config: AliasTableConfig) -> Result<Self, AliasTableError> {
        let seniority = Self::normalize_headers(CandidateField::Seniority, &config.seniority)?;
        let years = Self::normalize_headers(CandidateField::Years, &config.years)?;
        let availability =
            Self::normalize_headers(CandidateField::Availability, &config.availability)?;
        let availability_true = Self::normalize_tokens("true", &config.availability_true)?;
        let availability_false = Self::normalize_tokens("false", &config.availability_false)?;

        let overlapping: Vec<String> = availability_true
            .iter()
            .filter(|token| availability_false.contains(token))
            .cloned()
            .collect();
        if !overlapping.is_empty() {
            return Err(AliasTableError::OverlappingAvailabilityTokens {
                tokens: overlapping,
            });
        }

        Ok(AliasTable {
            seniority,
            years,
            availability,
            availability_true,
            availability_false,
        })
    }

    /// Strict rule set: one spelling per column and literal booleans only.
    pub fn server() -> Self {
        Self::from_static(
            &["seniority"],
            &["years"],
            &["availability"],
            &["true"],
            &["false"],
        )
    }

    /// Lenient rule set with English and Spanish synonyms.
    pub fn client() -> Self {
        Self::from_static(
            &["seniority"],
            &[
                "years",
                "anosdeexperiencia",
                "anos_de_experiencia",
                "anosexperiencia",
                "experiencia",
                "yearsofexperience",
                "years_of_experience",
            ],
            &["availability", "disponibilidad"],
            &["true", "1", "si", "sí", "available", "disponible", "yes"],
            &["false", "0", "no", "notavailable", "no disponible"],
        )
    }

    /// Load and validate a table from a JSON file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read alias table {}", path.display()))?;
        let config: AliasTableConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid alias table JSON in {}", path.display()))?;
        let table = AliasTable::new(config)
            .with_context(|| format!("Invalid alias table in {}", path.display()))?;
        Ok(table)
    }

    /// Normalized header aliases for a field, in registration order.
    pub fn aliases(&self, field: CandidateField) -> &[String] {
        match field {
            CandidateField::Seniority => &self.seniority,
            CandidateField::Years => &self.years,
            CandidateField::Availability => &self.availability,
        }
    }

    /// Return the first non-blank value among the field's aliases.
    pub fn resolve<'a>(&self, row: &'a NormalizedRow, field: CandidateField) -> AliasLookup<'a> {
        let mut first_blank = None;

        for alias in self.aliases(field) {
            if let Some(value) = row.get(alias) {
                if !is_blank_value(value) {
                    return AliasLookup::Value(value);
                }
                first_blank.get_or_insert(value);
            }
        }

        match first_blank {
            Some(blank) => AliasLookup::Empty(blank),
            None => AliasLookup::NotFound,
        }
    }

    /// `token` must already be normalized with [`normalize_token`].
    pub fn is_true_token(&self, token: &str) -> bool {
        self.availability_true.iter().any(|t| t == token)
    }

    /// `token` must already be normalized with [`normalize_token`].
    pub fn is_false_token(&self, token: &str) -> bool {
        self.availability_false.iter().any(|t| t == token)
    }

    pub fn true_tokens(&self) -> &[String] {
        &self.availability_true
    }

    pub fn false_tokens(&self) -> &[String] {
        &self.availability_false
    }

    fn from_static(
        seniority: &[&str],
        years: &[&str],
        availability: &[&str],
        availability_true: &[&str],
        availability_false: &[&str],
    ) -> Self {
        AliasTable {
            seniority: dedup_normalized(seniority, normalize_header),
            years: dedup_normalized(years, normalize_header),
            availability: dedup_normalized(availability, normalize_header),
            availability_true: dedup_normalized(availability_true, normalize_token),
            availability_false: dedup_normalized(availability_false, normalize_token),
        }
    }

    fn normalize_headers(
        field: CandidateField,
        aliases: &[String],
    ) -> Result<Vec<String>, AliasTableError> {
        if aliases.is_empty() {
            return Err(AliasTableError::NoAliases { field });
        }
        Self::normalize_all(aliases, normalize_header, || format!("column \"{field}\""))
    }

    fn normalize_tokens(set: &str, tokens: &[String]) -> Result<Vec<String>, AliasTableError> {
        Self::normalize_all(tokens, normalize_token, || {
            format!("availability {set} tokens")
        })
    }

    fn normalize_all(
        entries: &[String],
        normalize: fn(&str) -> String,
        context: impl Fn() -> String,
    ) -> Result<Vec<String>, AliasTableError> {
        if entries.iter().any(|entry| normalize(entry).is_empty()) {
            return Err(AliasTableError::BlankAlias { context: context() });
        }
        Ok(dedup_normalized(entries, normalize))
    }
}

fn dedup_normalized<S: AsRef<str>>(entries: &[S], normalize: fn(&str) -> String) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = normalize(entry.as_ref());
        if !normalized.contains(&key) {
            normalized.push(key);
        }
    }
    normalized
}

/// Normalize every key of a raw row.
///
/// When two headers collapse to the same key, the first non-blank value in column
/// order is kept.
pub fn normalize_row(row: &Map<String, Value>) -> NormalizedRow {
    let mut normalized = NormalizedRow::new();
    for (key, value) in row {
        let normalized_key = normalize_header(key);
        match normalized.get(&normalized_key) {
            Some(existing) if !is_blank_value(existing) => {}
            _ => {
                normalized.insert(normalized_key, value.clone());
            }
        }
    }
    normalized
}

/// Null and whitespace-only strings count as blank.
pub fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => is_blank(s),
        _ => false,
    }
}
