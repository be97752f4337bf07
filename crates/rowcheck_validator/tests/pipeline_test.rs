//! Integration tests for the validation pipeline.
//!
//! These tests run complete inputs through the runner using realistic rule
//! sets, the built-in catalog and file-backed pipe-delimited records.

use pretty_assertions::assert_eq;
use rowcheck_core::{RuleSet, RuleSetBuilder};
use rowcheck_validator::{
    PipeReader, PipeWriter, RunError, RunSummary, ValidationRunner, VecSink, VecSource,
};
use std::fs;

const SSN: &str = r"^(?:00[1-9]|0[1-9]\d|[1-578]\d{2}|6[0-57-9]\d|66[0-57-9])[- ]?(?:0[1-9]|[1-9]\d)[- ]?(?:000[1-9]|00[1-9]\d|0[1-9]\d{2}|[1-9]\d{3})$";

/// Payroll feed: name is required, SSN is checked, the routing number must
/// carry a valid checksum when present and the trailing code is free-form.
fn create_payroll_rule_set() -> RuleSet {
    RuleSetBuilder::new("payroll")
        .field_count(4)
        .blocklist(0, ["UNKNOWN", "TEST"], false)
        .regex(1, SSN, false)
        .aba(2, true, true)
        .build()
        .unwrap()
}

fn strings(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

fn run_rows(rule_set: RuleSet, rows: Vec<Vec<&str>>) -> (RunSummary, VecSink, VecSink) {
    let mut source = VecSource::from_rows(rows);
    let mut accepted = VecSink::new();
    let mut rejected = VecSink::new();
    let summary = ValidationRunner::new(rule_set)
        .run(&mut source, &mut accepted, &mut rejected)
        .expect("Run should succeed");
    (summary, accepted, rejected)
}

#[test]
fn test_payroll_feed_end_to_end() {
    let (summary, accepted, rejected) = run_rows(
        create_payroll_rule_set(),
        vec![
            vec!["name", "ssn", "aba", "code"],
            vec!["Bob", "123-45-6789", "490000018", "A1"],
            vec!["", "666-00-0000", "123456789", ""],
        ],
    );

    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.accepted_rows, 1);
    assert_eq!(summary.rejected_rows, 1);

    assert_eq!(
        accepted.records(),
        &[
            strings(&["name", "ssn", "aba", "code"]),
            strings(&["Bob", "123-45-6789", "490000018", "A1"]),
        ]
    );
    assert_eq!(
        rejected.records(),
        &[
            strings(&["name", "ssn", "aba", "code", "ERROR_MESSAGE"]),
            strings(&[
                "",
                "666-00-0000",
                "123456789",
                "",
                "BAD DATA IN FIELD: name VALUE: EMPTY"
            ]),
        ]
    );

    let counts: Vec<(usize, &str, u64)> = summary
        .field_failures
        .iter()
        .map(|f| (f.position, f.name.as_str(), f.failures))
        .collect();
    assert_eq!(counts, vec![(0, "name", 1), (1, "ssn", 0), (2, "aba", 0)]);
}

#[test]
fn test_every_row_lands_in_exactly_one_output() {
    let rows = vec![
        vec!["name", "ssn", "aba", "code"],
        vec!["Ann", "123-45-6789", "", "x"],
        vec!["TEST", "123-45-6789", "", "x"],
        vec!["Cy", "123456789", "490000018", ""],
        vec!["Dee", "900-12-3456", "", ""],
        vec!["Eve", "123-45-6789"],
        vec!["Fay", "123-45-6789", "490000019", "z"],
        vec!["Gus", "", "", ""],
    ];
    let (summary, accepted, rejected) = run_rows(create_payroll_rule_set(), rows);

    assert_eq!(summary.total_rows, 7);
    assert_eq!(summary.accepted_rows + summary.rejected_rows, summary.total_rows);
    assert_eq!(accepted.records().len() as u64, summary.accepted_rows + 1);
    assert_eq!(rejected.records().len() as u64, summary.rejected_rows + 1);

    let messages: Vec<&str> = rejected.records()[1..]
        .iter()
        .map(|r| r.last().unwrap().as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "BAD DATA IN FIELD: name VALUE: TEST",
            "BAD DATA IN FIELD: ssn VALUE: 900-12-3456",
            "INCORRECT NUMBER OF FIELDS",
            "BAD DATA IN FIELD: aba VALUE: 490000019",
            "BAD DATA IN FIELD: ssn VALUE: EMPTY",
        ]
    );
}

#[test]
fn test_builtin_employee_rule_set() {
    let catalog = rowcheck_parser::builtin_catalog().expect("Built-in catalog must compile");
    let runner = ValidationRunner::from_catalog(&catalog, "employee").unwrap();

    let mut source = VecSource::from_rows([
        vec!["name", "ssn", "aba", "code"],
        vec!["Bob", "123-45-6789", "490000018", "1234"],
        vec!["Bob", "123-45-6789", "490000018", "A1"],
        vec!["Bob", "123-45-6789", "", ""],
    ]);
    let mut accepted = VecSink::new();
    let mut rejected = VecSink::new();
    let summary = runner
        .run(&mut source, &mut accepted, &mut rejected)
        .unwrap();

    assert_eq!(summary.rule_set, "employee");
    assert_eq!(summary.accepted_rows, 2);
    assert_eq!(
        rejected.records()[1].last().unwrap(),
        "BAD DATA IN FIELD: code VALUE: A1"
    );
}

#[test]
fn test_builtin_catalog_selection_is_fresh_per_run() {
    let catalog = rowcheck_parser::builtin_catalog().unwrap();

    for header in [["a", "b", "c", "d"], ["w", "x", "y", "z"]] {
        let mut source = VecSource::from_rows([header.to_vec(), vec!["", "1", "2", "3"]]);
        let mut rejected = VecSink::new();
        ValidationRunner::from_catalog(&catalog, "customer")
            .unwrap()
            .run(&mut source, &mut VecSink::new(), &mut rejected)
            .unwrap();

        assert_eq!(
            rejected.records()[1].last().unwrap(),
            &format!("BAD DATA IN FIELD: {} VALUE: EMPTY", header[0])
        );
    }
}

#[test]
fn test_no_validation_skips_header_check() {
    let catalog = rowcheck_parser::builtin_catalog().unwrap();
    let (summary, accepted, _) = run_rows(
        catalog.select("novalidate").unwrap(),
        vec![vec!["only"], vec!["a", "b", "c"], vec![]],
    );

    assert_eq!(summary.accepted_rows, 2);
    assert_eq!(accepted.records().len(), 3);
}

#[test]
fn test_header_mismatch_is_fatal() {
    let mut source = VecSource::from_rows([vec!["name", "ssn", "aba"]]);
    let err = ValidationRunner::new(create_payroll_rule_set())
        .run(&mut source, &mut VecSink::new(), &mut VecSink::new())
        .unwrap_err();

    assert!(matches!(err, RunError::ConfigMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Number of fields in input does not match payroll config. Got: 3 Expected: 4"
    );
}

#[test]
fn test_summary_serializes_to_json() {
    let (summary, _, _) = run_rows(
        create_payroll_rule_set(),
        vec![
            vec!["name", "ssn", "aba", "code"],
            vec!["UNKNOWN", "123-45-6789", "", ""],
        ],
    );

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["rule_set"], "payroll");
    assert_eq!(json["rejected_rows"], 1);
    assert_eq!(json["field_failures"][0]["name"], "name");
    assert_eq!(json["field_failures"][0]["failures"], 1);
}

#[test]
fn test_pipe_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let good = dir.path().join("good.txt");
    let bad = dir.path().join("bad.txt");

    fs::write(
        &input,
        "name|ssn|aba|code\nBob|123-45-6789|490000018|A1\n|666-00-0000|123456789|\nAl\\|Jo|123-45-6789||\"q\"\n",
    )
    .unwrap();

    let mut source = PipeReader::from_path(&input).unwrap();
    let mut accepted = PipeWriter::from_path(&good).unwrap();
    let mut rejected = PipeWriter::from_path(&bad).unwrap();

    let summary = ValidationRunner::new(create_payroll_rule_set())
        .run(&mut source, &mut accepted, &mut rejected)
        .unwrap();
    drop(accepted);
    drop(rejected);

    assert_eq!(summary.accepted_rows, 2);
    assert_eq!(summary.rejected_rows, 1);
    assert_eq!(
        fs::read_to_string(&good).unwrap(),
        "name|ssn|aba|code\r\nBob|123-45-6789|490000018|A1\r\nAl\\|Jo|123-45-6789||\\\"q\\\"\r\n"
    );
    assert_eq!(
        fs::read_to_string(&bad).unwrap(),
        "name|ssn|aba|code|ERROR_MESSAGE\r\n|666-00-0000|123456789||BAD DATA IN FIELD: name VALUE: EMPTY\r\n"
    );
}

#[test]
fn test_blank_lines_are_counted_and_routed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let good = dir.path().join("good.txt");
    let bad = dir.path().join("bad.txt");

    fs::write(
        &input,
        "name|ssn|aba|code\n\nBob|123-45-6789|490000018|A1\r\n\r\n",
    )
    .unwrap();

    let mut source = PipeReader::from_path(&input).unwrap();
    let mut accepted = PipeWriter::from_path(&good).unwrap();
    let mut rejected = PipeWriter::from_path(&bad).unwrap();

    let summary = ValidationRunner::new(create_payroll_rule_set())
        .run(&mut source, &mut accepted, &mut rejected)
        .unwrap();
    drop(accepted);
    drop(rejected);

    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.accepted_rows, 1);
    assert_eq!(summary.rejected_rows, 2);
    assert_eq!(
        fs::read_to_string(&bad).unwrap(),
        "name|ssn|aba|code|ERROR_MESSAGE\r\n\
         INCORRECT NUMBER OF FIELDS\r\n\
         INCORRECT NUMBER OF FIELDS\r\n"
    );
}

#[test]
fn test_missing_input_file() {
    let err = PipeReader::from_path("does/not/exist.txt").err().unwrap();
    assert!(matches!(err, RunError::Io { .. }));
    assert!(err.to_string().contains("does/not/exist.txt"));
}
