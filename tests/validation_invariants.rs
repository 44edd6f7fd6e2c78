//! Validation Invariant Tests
//!
//! - record_type only holds observation / event / target
//! - Events never carry a pillar
//! - Observations always carry value_numeric
//! - Checks run in a fixed order; the first failure is the one reported

use fi_pipeline::dataset::load_unified_file;
use fi_pipeline::records::{Record, RecordType};
use fi_pipeline::validation::{RecordValidator, Severity, ValidationErrorCode};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const HEADER: &str = "record_id,record_type,pillar,indicator,indicator_code,value_numeric,observation_date,source_name,source_url,confidence";

fn write_unified(rows: &[&str]) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ethiopia_fi_unified_data.csv");
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    (tmp, path)
}

// =============================================================================
// Loaded Dataset Checks
// =============================================================================

/// A well-formed file passes.
#[test]
fn test_valid_file_passes() {
    let (_tmp, path) = write_unified(&[
        "REC_1,observation,ACCESS,Account Ownership,ACC_OWNERSHIP,46,2021-12-31,Findex,,high",
        "EVT_1,event,,Telebirr launch,,,2021-05-11,Ethio Telecom,,medium",
        "TGT_1,target,ACCESS,Account Ownership,ACC_OWNERSHIP,,2025-12-31,NFIS,,high",
    ]);
    let dataset = load_unified_file(&path).unwrap();
    assert!(RecordValidator::new().validate_all(dataset.records()).is_ok());
}

/// Event rows with a pillar are rejected, citing the pillar invariant.
#[test]
fn test_event_with_pillar_rejected() {
    let (_tmp, path) = write_unified(&[
        "REC_1,observation,ACCESS,Account Ownership,ACC_OWNERSHIP,46,2021-12-31,Findex,,high",
        "EVT_1,event,USAGE,Telebirr launch,,,2021-05-11,Ethio Telecom,,medium",
    ]);
    let dataset = load_unified_file(&path).unwrap();
    let err = RecordValidator::new()
        .validate_all(dataset.records())
        .unwrap_err();

    assert_eq!(err.code(), ValidationErrorCode::EventHasPillar);
    assert_eq!(err.severity(), Severity::Fatal);
    assert_eq!(err.offending(), &["EVT_1".to_string()]);
    assert!(err.to_string().contains("events carry no pillar"));
}

/// A non-numeric value coerces to missing and then fails the value check.
#[test]
fn test_unparseable_value_counts_as_missing() {
    let (_tmp, path) = write_unified(&[
        "REC_1,observation,ACCESS,Account Ownership,ACC_OWNERSHIP,n/a,2021-12-31,Findex,,high",
    ]);
    let dataset = load_unified_file(&path).unwrap();
    let err = RecordValidator::new()
        .validate_all(dataset.records())
        .unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::ObservationMissingValue);
}

/// A bad date is tolerated, not a validation failure.
#[test]
fn test_unparseable_date_tolerated() {
    let (_tmp, path) = write_unified(&[
        "REC_1,observation,ACCESS,Account Ownership,ACC_OWNERSHIP,46,sometime,Findex,,high",
    ]);
    let dataset = load_unified_file(&path).unwrap();
    assert!(dataset.records()[0].observation_date.is_none());
    assert!(RecordValidator::new().validate_all(dataset.records()).is_ok());
}

/// Unknown categories are named in the message, sorted.
#[test]
fn test_invalid_record_types_named() {
    let (_tmp, path) = write_unified(&[
        "X1,policy,,a,,,2021-01-01,,,",
        "X2,Forecast,,b,,,2021-01-01,,,",
        "X3,policy,,c,,,2021-01-01,,,",
    ]);
    let dataset = load_unified_file(&path).unwrap();
    let err = RecordValidator::new()
        .validate_all(dataset.records())
        .unwrap_err();

    assert_eq!(err.code(), ValidationErrorCode::InvalidRecordType);
    assert_eq!(err.message(), "Invalid record_type values: {Forecast, policy}");
}

// =============================================================================
// Ordering and Determinism
// =============================================================================

/// With every violation present, the record_type check reports first.
#[test]
fn test_check_order_is_fixed() {
    let mut bogus = Record::new("X1", RecordType::Target);
    bogus.record_type = Some("bogus".into());
    let mut pillar_event = Record::new("E1", RecordType::Event);
    pillar_event.pillar = Some("ACCESS".into());
    let missing_value = Record::new("O1", RecordType::Observation);

    let validator = RecordValidator::new();
    let all = vec![missing_value.clone(), pillar_event.clone(), bogus];
    assert_eq!(
        validator.validate_all(&all).unwrap_err().code(),
        ValidationErrorCode::InvalidRecordType
    );

    let two = vec![missing_value, pillar_event];
    assert_eq!(
        validator.validate_all(&two).unwrap_err().code(),
        ValidationErrorCode::EventHasPillar
    );
}

/// Same records, same verdict, every time.
#[test]
fn test_validation_is_deterministic() {
    let records = vec![Record::new("O1", RecordType::Observation)];
    let first = RecordValidator::new().validate_all(&records).unwrap_err();
    for _ in 0..50 {
        assert_eq!(RecordValidator::new().validate_all(&records).unwrap_err(), first);
    }
}
