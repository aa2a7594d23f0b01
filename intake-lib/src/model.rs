use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical spreadsheet fields the engine extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateField {
    Seniority,
    Years,
    Availability,
}

impl CandidateField {
    /// Fields in validation (and canonical header) order.
    pub const ALL: [CandidateField; 3] = [
        CandidateField::Seniority,
        CandidateField::Years,
        CandidateField::Availability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateField::Seniority => "seniority",
            CandidateField::Years => "years",
            CandidateField::Availability => "availability",
        }
    }
}

impl fmt::Display for CandidateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    Senior,
}

impl Seniority {
    /// Match an already normalized token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "junior" => Some(Seniority::Junior),
            "senior" => Some(Seniority::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Senior => "senior",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three validated spreadsheet fields.
///
/// Only the row validator builds this from spreadsheet input, so every instance
/// holds a complete, valid set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateExcelData {
    pub seniority: Seniority,
    pub years: u32,
    pub availability: bool,
}

/// Name and surname, validated by the caller before they reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub name: String,
    pub surname: String,
}

impl IdentityFields {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        IdentityFields {
            name: name.into(),
            surname: surname.into(),
        }
    }
}

/// The externally visible candidate. Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub surname: String,
    pub seniority: Seniority,
    pub years: u32,
    pub availability: bool,
}

/// Merge identity fields with validated spreadsheet data.
pub fn assemble(identity: IdentityFields, data: CandidateExcelData) -> CandidateRecord {
    CandidateRecord {
        name: identity.name,
        surname: identity.surname,
        seniority: data.seniority,
        years: data.years,
        availability: data.availability,
    }
}
