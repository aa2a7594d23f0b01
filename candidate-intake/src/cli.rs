use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use intake_lib::{
    AliasTable, CandidateError, CandidateRecord, ExcelCandidateParser, IdentityFields,
    UploadedFile, YearsPolicy,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "candidate-intake")]
#[command(about = "Validate a single-row candidate Excel file and turn it into a candidate record")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the Excel file and print the candidate record as JSON
    Parse {
        #[command(flatten)]
        engine: EngineArgs,

        /// Candidate name
        #[arg(long, value_parser = non_blank)]
        name: String,

        /// Candidate surname
        #[arg(long, value_parser = non_blank)]
        surname: String,
    },

    /// Validate the Excel file and write the canonical single-row workbook
    Normalize {
        #[command(flatten)]
        engine: EngineArgs,

        /// Where to write the normalized .xlsx file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
pub struct EngineArgs {
    /// Path to the Excel (.xlsx) file with exactly one data row
    #[arg(short, long)]
    pub excel_file: PathBuf,

    /// Built-in alias table used to recognize headers and availability values
    #[arg(long, value_enum, default_value_t = AliasProfile::Client)]
    pub profile: AliasProfile,

    /// JSON alias table overriding the built-in profile
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// Smallest accepted number of years of experience (0 or 1 in practice)
    #[arg(long, default_value_t = YearsPolicy::default().min_years)]
    pub min_years: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasProfile {
    /// English and Spanish synonyms (si/no, disponible, años de experiencia, ...)
    Client,
    /// One spelling per column, literal true/false only
    Server,
}

/// What a successful command produced
#[derive(Debug)]
pub enum Outcome {
    Record(CandidateRecord),
    Normalized { output: PathBuf },
}

/// A command failure, split between engine rejections and everything else
#[derive(Debug)]
pub enum RunError {
    Candidate(CandidateError),
    Other(anyhow::Error),
}

impl From<CandidateError> for RunError {
    fn from(err: CandidateError) -> Self {
        RunError::Candidate(err)
    }
}

impl From<anyhow::Error> for RunError {
    fn from(err: anyhow::Error) -> Self {
        RunError::Other(err)
    }
}

/// Identity fields must carry visible text; surrounding whitespace is dropped.
fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("value must not be blank".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

impl EngineArgs {
    pub fn build_parser(&self) -> anyhow::Result<ExcelCandidateParser> {
        let aliases = match &self.aliases {
            Some(path) => AliasTable::from_path(path)?,
            None => match self.profile {
                AliasProfile::Client => AliasTable::client(),
                AliasProfile::Server => AliasTable::server(),
            },
        };

        Ok(ExcelCandidateParser::builder()
            .aliases(aliases)
            .min_years(self.min_years)
            .build())
    }
}

pub fn run(command: &Command) -> Result<Outcome, RunError> {
    match command {
        Command::Parse {
            engine,
            name,
            surname,
        } => {
            let parser = engine.build_parser()?;
            let record = parser.parse_candidate(
                IdentityFields::new(name.as_str(), surname.as_str()),
                &UploadedFile::from_path(&engine.excel_file),
            )?;
            Ok(Outcome::Record(record))
        }
        Command::Normalize { engine, output } => {
            let parser = engine.build_parser()?;
            let result = parser.parse_and_normalize(&UploadedFile::from_path(&engine.excel_file))?;
            write_output(output, &result.normalized_file)?;
            Ok(Outcome::Normalized {
                output: output.clone(),
            })
        }
    }
}

fn write_output(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write normalized file {}", path.display()))
}
