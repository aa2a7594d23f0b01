//! End-to-end scenarios: workbook buffer in, validated candidate data or typed
//! error out.

use intake_lib::{
    AliasTable, CandidateError, CandidateExcelData, CandidateField, ExcelCandidateParser,
    IdentityFields, Seniority, UploadedFile, ValidationError, write_candidate,
};
use serde_json::json;

mod common;
use common::CANONICAL_HEADERS;

#[test]
fn test_scenario_a_string_values_are_coerced() {
    let data = common::parse_row(
        &CANONICAL_HEADERS,
        &[json!("Junior"), json!("6"), json!("true")],
    )
    .unwrap();

    assert_eq!(
        data,
        CandidateExcelData {
            seniority: Seniority::Junior,
            years: 6,
            availability: true,
        }
    );
}

#[test]
fn test_scenario_b_missing_seniority_column() {
    let err = common::parse_row(&["years", "availability"], &[json!(4), json!(true)]).unwrap_err();

    assert!(matches!(
        err,
        CandidateError::Validation(ValidationError::MissingColumn {
            field: CandidateField::Seniority
        })
    ));
}

#[test]
fn test_scenario_c_unrecognized_availability_token() {
    let err = common::parse_row(
        &CANONICAL_HEADERS,
        &[json!("senior"), json!(8), json!("maybe")],
    )
    .unwrap_err();

    match err {
        CandidateError::Validation(ValidationError::InvalidAvailability { value }) => {
            assert_eq!(value, Some(json!("maybe")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scenario_d_unknown_seniority() {
    let err = common::parse_row(&CANONICAL_HEADERS, &[json!("mid"), json!(5), json!(true)])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Column \"seniority\" must be \"junior\" or \"senior\". Received: \"mid\"."
    );
}

#[test]
fn test_scenario_e_negative_years() {
    let err = common::parse_row(&CANONICAL_HEADERS, &[json!("junior"), json!(-1), json!(true)])
        .unwrap_err();

    match err {
        CandidateError::Validation(ValidationError::InvalidYears { value, .. }) => {
            assert_eq!(value, Some(json!(-1)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_zero_years_depends_on_policy() {
    let values = [json!("junior"), json!(0), json!(true)];

    let lenient = common::parse_row(&CANONICAL_HEADERS, &values).unwrap();
    assert_eq!(lenient.years, 0);

    let strict = ExcelCandidateParser::builder()
        .aliases(AliasTable::server())
        .min_years(1)
        .build();
    let err = common::parse_row_with(&strict, &CANONICAL_HEADERS, &values).unwrap_err();
    assert!(matches!(
        err,
        CandidateError::Validation(ValidationError::InvalidYears { min_years: 1, .. })
    ));
}

#[test]
fn test_workbook_without_sheets() {
    let buffer = common::WorkbookFixture::without_sheets().to_bytes();
    let err = ExcelCandidateParser::default()
        .parse_bytes(&buffer)
        .unwrap_err();
    assert!(matches!(err, CandidateError::NoSheets));
}

#[test]
fn test_workbook_with_header_only() {
    let buffer = common::candidate_workbook_rows(&CANONICAL_HEADERS, &[]);
    let err = ExcelCandidateParser::default()
        .parse_bytes(&buffer)
        .unwrap_err();
    assert!(matches!(err, CandidateError::NoRows));
}

#[test]
fn test_workbook_with_two_data_rows() {
    let buffer = common::candidate_workbook_rows(
        &CANONICAL_HEADERS,
        &[
            vec![json!("junior"), json!(1), json!(true)],
            vec![json!("senior"), json!(9), json!(false)],
        ],
    );

    let err = ExcelCandidateParser::default()
        .parse_bytes(&buffer)
        .unwrap_err();
    assert!(matches!(
        err,
        CandidateError::TooManyRows {
            rows: 2,
            first_extra_row: 3
        }
    ));
}

#[test]
fn test_too_many_rows_reported_before_field_errors() {
    let buffer = common::candidate_workbook_rows(
        &CANONICAL_HEADERS,
        &[
            vec![json!("mid"), json!(1), json!(true)],
            vec![json!("senior"), json!(9), json!(false)],
        ],
    );

    let err = ExcelCandidateParser::default()
        .parse_bytes(&buffer)
        .unwrap_err();
    assert!(matches!(err, CandidateError::TooManyRows { .. }));
}

#[test]
fn test_corrupt_buffer_is_unexpected_processing() {
    let err = ExcelCandidateParser::default()
        .parse_bytes(b"PK\x03\x04 truncated")
        .unwrap_err();
    assert!(matches!(err, CandidateError::UnexpectedProcessing { .. }));
    assert!(!err.is_client_error());
}

#[test]
fn test_unregistered_header_counts_as_missing_column() {
    // A recognizable value under an unknown header is not guessed at
    let err = common::parse_row(
        &["nivel", "years", "availability"],
        &[json!("junior"), json!(2), json!(true)],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CandidateError::Validation(ValidationError::MissingColumn {
            field: CandidateField::Seniority
        })
    ));
}

#[test]
fn test_localized_headers_resolve() {
    let data = common::parse_row(
        &["  SENIORITY ", "Años De Experiencia", "Disponibilidad"],
        &[json!("senior"), json!(11), json!("No disponible")],
    )
    .unwrap();

    assert_eq!(data.seniority, Seniority::Senior);
    assert_eq!(data.years, 11);
    assert!(!data.availability);
}

#[test]
fn test_written_data_reads_back_identically() {
    let parser = ExcelCandidateParser::default();

    for seniority in [Seniority::Junior, Seniority::Senior] {
        for years in [0, 1, 40] {
            for availability in [true, false] {
                let data = CandidateExcelData {
                    seniority,
                    years,
                    availability,
                };
                let buffer = write_candidate(&data).unwrap();
                assert_eq!(parser.parse_bytes(&buffer).unwrap(), data);
            }
        }
    }
}

#[test]
fn test_parse_candidate_merges_identity() {
    let record = ExcelCandidateParser::default()
        .parse_candidate(
            IdentityFields::new("Ada", "Lovelace"),
            &UploadedFile::from_bytes(common::default_candidate_workbook()),
        )
        .unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "name": "Ada",
            "surname": "Lovelace",
            "seniority": "junior",
            "years": 5,
            "availability": true
        })
    );
}
