//! Response log integration tests
//!
//! Exercises the append-only CSV log against a real filesystem: header
//! creation, schema fixed at first write, drift handling, and appends
//! across separate log instances (separate runs).

use chrono::NaiveDateTime;
use formpilot::record::AnswerRecord;
use formpilot::response_log::{ResponseLog, TIMESTAMP_FORMAT};
use std::path::Path;
use tempfile::TempDir;

fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

fn record(entries: &[(&str, &str)]) -> AnswerRecord {
    let mut record = AnswerRecord::new();
    for (question, answer) in entries {
        record.insert(*question, *answer);
    }
    record
}

#[test]
fn test_fresh_log_writes_header_and_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");
    let log = ResponseLog::new(&path);

    log.append(&record(&[("Age", "18-24")])).unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp", "Age"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][1], "18-24");
    assert!(
        NaiveDateTime::parse_from_str(&rows[0][0], TIMESTAMP_FORMAT).is_ok(),
        "timestamp {:?} does not match {}",
        rows[0][0],
        TIMESTAMP_FORMAT
    );
}

#[test]
fn test_header_written_only_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");
    let log = ResponseLog::new(&path);

    log.append(&record(&[("Age", "18-24"), ("Gender", "Female")]))
        .unwrap();
    log.append(&record(&[("Age", "25-34"), ("Gender", "Other")]))
        .unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp", "Age", "Gender"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "25-34");
    assert_eq!(rows[1][2], "Other");
}

#[test]
fn test_superset_record_drops_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");
    let log = ResponseLog::new(&path);

    log.append(&record(&[("Age", "18-24")])).unwrap();
    log.append(&record(&[("Age", "35-44"), ("Country", "Other country")]))
        .unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp", "Age"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].len(), 2);
    assert_eq!(rows[1][1], "35-44");
}

#[test]
fn test_disjoint_record_writes_empty_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");
    let log = ResponseLog::new(&path);

    log.append(&record(&[("Age", "18-24")])).unwrap();
    log.append(&record(&[("Country", "Other country")])).unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp", "Age"]);
    assert_eq!(rows[1][1], "");
}

#[test]
fn test_appends_across_log_instances() {
    // Separate ResponseLog values over the same path model separate runs;
    // the second run must pick up the first run's header.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");

    ResponseLog::new(&path)
        .append(&record(&[("Age", "18-24")]))
        .unwrap();
    ResponseLog::new(&path)
        .append(&record(&[("Age", "45-54")]))
        .unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp", "Age"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "45-54");
}

#[test]
fn test_empty_record_still_logs_a_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("responses.csv");
    let log = ResponseLog::new(&path);

    log.append(&AnswerRecord::new()).unwrap();

    let (header, rows) = read_rows(&path);
    assert_eq!(header, vec!["Timestamp"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
}

#[test]
fn test_unwritable_path_surfaces_error() {
    let dir = TempDir::new().unwrap();
    // The directory itself is not a writable file path.
    let log = ResponseLog::new(dir.path());

    let result = log.append(&record(&[("Age", "18-24")]));
    assert!(result.is_err());
}
