use candidate_intake::{AliasProfile, Args, Command, Outcome, RunError, run};
use clap::Parser;
use intake_lib::test_utils::{candidate_workbook, default_candidate_workbook};
use intake_lib::{CandidateErrorKind, ExcelCandidateParser, Seniority};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn parse_args(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("candidate-intake").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_command_produces_record() {
    let dir = TempDir::new().unwrap();
    let excel = write_fixture(&dir, "candidate.xlsx", &default_candidate_workbook());

    let args = parse_args(&[
        "parse",
        "--excel-file",
        &excel,
        "--name",
        " Ada ",
        "--surname",
        "Lovelace",
    ]);

    match run(&args.command) {
        Ok(Outcome::Record(record)) => {
            assert_eq!(record.name, "Ada");
            assert_eq!(record.surname, "Lovelace");
            assert_eq!(record.seniority, Seniority::Junior);
            assert_eq!(record.years, 5);
            assert!(record.availability);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_blank_identity_is_rejected_by_argument_parsing() {
    let result = Args::try_parse_from([
        "candidate-intake",
        "parse",
        "--excel-file",
        "candidate.xlsx",
        "--name",
        "   ",
        "--surname",
        "Lovelace",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_defaults_use_client_profile_and_zero_years() {
    let args = parse_args(&["normalize", "--excel-file", "in.xlsx", "--output", "out.xlsx"]);
    match args.command {
        Command::Normalize { engine, .. } => {
            assert_eq!(engine.profile, AliasProfile::Client);
            assert_eq!(engine.min_years, 0);
            assert!(engine.aliases.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_server_profile_rejects_spanish_availability() {
    let dir = TempDir::new().unwrap();
    let excel = write_fixture(
        &dir,
        "candidate.xlsx",
        &candidate_workbook(
            &["seniority", "years", "availability"],
            &[json!("senior"), json!(4), json!("si")],
        ),
    );

    let args = parse_args(&[
        "parse",
        "--excel-file",
        &excel,
        "--name",
        "Ada",
        "--surname",
        "Lovelace",
        "--profile",
        "server",
    ]);

    match run(&args.command) {
        Err(RunError::Candidate(err)) => {
            assert_eq!(err.kind(), CandidateErrorKind::InvalidAvailability);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_min_years_flag_rejects_zero() {
    let dir = TempDir::new().unwrap();
    let excel = write_fixture(
        &dir,
        "candidate.xlsx",
        &candidate_workbook(
            &["seniority", "years", "availability"],
            &[json!("junior"), json!(0), json!(true)],
        ),
    );

    let args = parse_args(&[
        "parse",
        "--excel-file",
        &excel,
        "--name",
        "Ada",
        "--surname",
        "Lovelace",
        "--min-years",
        "1",
    ]);

    match run(&args.command) {
        Err(RunError::Candidate(err)) => {
            assert_eq!(err.kind(), CandidateErrorKind::InvalidYears);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_custom_alias_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let aliases = write_fixture(
        &dir,
        "aliases.json",
        json!({
            "seniority": ["Nivel"],
            "years": ["Experiencia (años)"],
            "availability": ["Disponible"],
            "availabilityTrue": ["vale"],
            "availabilityFalse": ["nada"]
        })
        .to_string()
        .as_bytes(),
    );
    let excel = write_fixture(
        &dir,
        "candidate.xlsx",
        &candidate_workbook(
            &["NIVEL", "experiencia (anos)", "disponible"],
            &[json!("senior"), json!(3), json!("Vale")],
        ),
    );

    let args = parse_args(&[
        "parse",
        "--excel-file",
        &excel,
        "--name",
        "Ada",
        "--surname",
        "Lovelace",
        "--aliases",
        &aliases,
    ]);

    match run(&args.command) {
        Ok(Outcome::Record(record)) => {
            assert_eq!(record.seniority, Seniority::Senior);
            assert_eq!(record.years, 3);
            assert!(record.availability);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_invalid_alias_file_is_not_a_candidate_error() {
    let dir = TempDir::new().unwrap();
    let aliases = write_fixture(
        &dir,
        "aliases.json",
        json!({
            "seniority": ["seniority"],
            "years": ["years"],
            "availability": ["availability"],
            "availabilityTrue": ["yes"],
            "availabilityFalse": ["YES"]
        })
        .to_string()
        .as_bytes(),
    );

    let args = parse_args(&[
        "normalize",
        "--excel-file",
        "unused.xlsx",
        "--output",
        "unused-out.xlsx",
        "--aliases",
        &aliases,
    ]);

    assert!(matches!(run(&args.command), Err(RunError::Other(_))));
}

#[test]
fn test_missing_excel_file_is_file_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.xlsx");

    let args = parse_args(&[
        "parse",
        "--excel-file",
        missing.to_str().unwrap(),
        "--name",
        "Ada",
        "--surname",
        "Lovelace",
    ]);

    match run(&args.command) {
        Err(RunError::Candidate(err)) => {
            assert_eq!(err.kind(), CandidateErrorKind::FileRead);
            assert!(!err.is_client_error());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_normalize_command_writes_canonical_workbook() {
    let dir = TempDir::new().unwrap();
    let excel = write_fixture(
        &dir,
        "candidate.xlsx",
        &candidate_workbook(
            &["Seniority", "Años de experiencia", "Disponibilidad"],
            &[json!("Senior"), json!("9"), json!("No")],
        ),
    );
    let output = dir.path().join("normalized.xlsx");

    let args = parse_args(&[
        "normalize",
        "--excel-file",
        &excel,
        "--output",
        output.to_str().unwrap(),
    ]);

    match run(&args.command) {
        Ok(Outcome::Normalized { output: written }) => assert_eq!(written, output),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let normalized = std::fs::read(Path::new(&output)).unwrap();
    let rows = intake_lib::read_rows(&normalized).unwrap();
    assert_eq!(
        rows[0].1.keys().collect::<Vec<_>>(),
        ["seniority", "years", "availability"]
    );

    let data = ExcelCandidateParser::builder()
        .aliases(intake_lib::AliasTable::server())
        .build()
        .parse_bytes(&normalized)
        .unwrap();
    assert_eq!(data.seniority, Seniority::Senior);
    assert_eq!(data.years, 9);
    assert!(!data.availability);
}
