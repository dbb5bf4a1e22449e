//! End-to-end monitor runs against scripted measurement sources.

use std::collections::VecDeque;
use std::fs;

use bwmon_core::display::{Border, MemorySink};
use bwmon_core::measurement::{FakeSpeedtest, MeasurementSource, RetryPolicy};
use bwmon_core::monitor::run_once;
use bwmon_core::storage::{HISTORY_MAX_LENGTH, HistoryStore};
use bwmon_core::{HistoryError, MeasurementError, MeasurementRecord, MonitorConfig, MonitorError};
use tempfile::tempdir;

/// Replays a fixed list of results, counting calls
struct ScriptedSource {
    results: VecDeque<Result<MeasurementRecord, MeasurementError>>,
    calls: usize,
}

impl ScriptedSource {
    fn new(results: Vec<Result<MeasurementRecord, MeasurementError>>) -> Self {
        Self {
            results: results.into(),
            calls: 0,
        }
    }
}

impl MeasurementSource for ScriptedSource {
    fn measure(&mut self) -> Result<MeasurementRecord, MeasurementError> {
        self.calls += 1;
        self.results.pop_front().unwrap_or_else(|| Err(unreachable_server()))
    }
}

fn unreachable_server() -> MeasurementError {
    MeasurementError::Spawn {
        program: "speedtest-cli".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    }
}

fn record(i: usize) -> MeasurementRecord {
    MeasurementRecord {
        ping: 20.0,
        download: 50_000_000.0 + i as f64 * 100_000.0,
        upload: 10_000_000.0 + i as f64 * 10_000.0,
        server: "Montreal, QC".into(),
        timestamp: format!("Jan 01 2024 @ 00:{:02}:00", i % 60),
    }
}

#[test]
fn cold_start_creates_history_and_refreshes_display() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::new(dir.path().join("history.json"));
    let mut source = ScriptedSource::new(vec![Ok(record(1))]);
    let mut sink = MemorySink::default();

    let outcome = run_once(&config, &mut source, Some(&mut sink)).unwrap();

    assert_eq!(outcome.record, record(1));
    assert_eq!(outcome.history_len, 1);
    assert!(!outcome.exported);
    assert_eq!(
        HistoryStore::new(&config.history_path).load().unwrap(),
        vec![record(1)]
    );

    assert_eq!(sink.refreshes, 1);
    let (frame, border) = sink.last.unwrap();
    assert_eq!(border, Border::Black);
    assert!(frame.count_on() > 0);
}

#[test]
fn headless_run_skips_display() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::new(dir.path().join("history.json"));
    let mut source = FakeSpeedtest::new();

    let outcome = run_once(&config, &mut source, None).unwrap();
    assert_eq!(outcome.history_len, 1);
    assert_eq!(outcome.record.server, "Montreal, QC");
}

#[test]
fn flaky_measurement_is_retried() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::new(dir.path().join("history.json"));
    let mut source = ScriptedSource::new(vec![
        Err(unreachable_server()),
        Err(unreachable_server()),
        Ok(record(3)),
    ]);

    let outcome = run_once(&config, &mut source, None).unwrap();
    assert_eq!(source.calls, 3);
    assert_eq!(outcome.record, record(3));
}

#[test]
fn exhausted_measurement_writes_nothing() {
    let dir = tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    let csv_path = dir.path().join("history.csv");
    HistoryStore::new(&history_path)
        .persist(&[record(0)])
        .unwrap();
    let before = fs::read(&history_path).unwrap();

    let config = MonitorConfig::new(&history_path).with_csv(&csv_path);
    let mut source = ScriptedSource::new(vec![]);
    let mut sink = MemorySink::default();

    let err = run_once(&config, &mut source, Some(&mut sink)).unwrap_err();

    assert!(matches!(
        err,
        MonitorError::Measurement(MeasurementError::Exhausted { attempts: 3, .. })
    ));
    assert_eq!(source.calls, 3);
    assert_eq!(fs::read(&history_path).unwrap(), before);
    assert!(!csv_path.exists());
    assert_eq!(sink.refreshes, 0);
}

#[test]
fn custom_retry_budget_is_honoured() {
    let dir = tempdir().unwrap();
    let config =
        MonitorConfig::new(dir.path().join("history.json")).with_retry(RetryPolicy::new(5));
    let mut source = ScriptedSource::new(vec![]);

    assert!(run_once(&config, &mut source, None).is_err());
    assert_eq!(source.calls, 5);
}

#[test]
fn malformed_history_aborts_before_measuring() {
    let dir = tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    fs::write(&history_path, "[{\"ping\": ").unwrap();

    let config = MonitorConfig::new(&history_path);
    let mut source = ScriptedSource::new(vec![Ok(record(1))]);

    let err = run_once(&config, &mut source, None).unwrap_err();

    assert!(matches!(
        err,
        MonitorError::History(HistoryError::Malformed { .. })
    ));
    assert_eq!(source.calls, 0);
    assert_eq!(fs::read_to_string(&history_path).unwrap(), "[{\"ping\": ");
}

#[test]
fn csv_export_appends_one_row_per_run() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("history.csv");
    let config = MonitorConfig::new(dir.path().join("history.json")).with_csv(&csv_path);

    let mut source = ScriptedSource::new(vec![Ok(record(1)), Ok(record(2))]);
    assert!(run_once(&config, &mut source, None).unwrap().exported);
    assert!(run_once(&config, &mut source, None).unwrap().exported);

    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().ends_with("Jan 01 2024 @ 00:02:00"));
}

#[test]
fn csv_failure_does_not_abort_run() {
    let dir = tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    // The CSV path is a directory, so it cannot be opened for appending.
    let config = MonitorConfig::new(&history_path).with_csv(dir.path());
    let mut source = ScriptedSource::new(vec![Ok(record(1))]);

    let outcome = run_once(&config, &mut source, None).unwrap();

    assert!(!outcome.exported);
    assert_eq!(
        HistoryStore::new(&history_path).load().unwrap(),
        vec![record(1)]
    );
}

#[test]
fn full_history_evicts_oldest_entry() {
    let dir = tempdir().unwrap();
    let history_path = dir.path().join("history.json");
    let full: Vec<_> = (0..HISTORY_MAX_LENGTH).map(record).collect();
    HistoryStore::new(&history_path).persist(&full).unwrap();

    let newest = record(HISTORY_MAX_LENGTH);
    let config = MonitorConfig::new(&history_path);
    let mut source = ScriptedSource::new(vec![Ok(newest.clone())]);

    let outcome = run_once(&config, &mut source, None).unwrap();
    assert_eq!(outcome.history_len, HISTORY_MAX_LENGTH);

    let stored = HistoryStore::new(&history_path).load().unwrap();
    assert_eq!(stored.len(), HISTORY_MAX_LENGTH);
    assert_eq!(stored.first(), Some(&record(1)));
    assert_eq!(stored.last(), Some(&newest));
}

#[test]
fn missing_history_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::new(dir.path().join("nope").join("history.json"));
    let mut source = ScriptedSource::new(vec![Ok(record(1))]);

    let err = run_once(&config, &mut source, None).unwrap_err();
    assert!(matches!(err, MonitorError::History(HistoryError::Write { .. })));
}
