//! Error path integration tests.
//!
//! Fatal conditions surface as single descriptive errors with no partial
//! results; the CLI exits non-zero on them.

use crate::helpers::tally_binary;
use std::process::Command;
use tally_lib::TallyError;
use tally_lib::pipeline::Aggregator;
use tempfile::TempDir;

#[test]
fn test_missing_input_is_source_unavailable() {
    let err = Aggregator::new().run_path("/no/such/measurements.txt").unwrap_err();
    assert!(matches!(err, TallyError::SourceUnavailable { .. }));
    let msg = err.to_string();
    assert!(msg.contains("Cannot open input"));
    assert!(msg.contains("/no/such/measurements.txt"));
}

#[test]
fn test_zero_batch_size_is_invalid_parameter() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("measurements.txt");
    std::fs::write(&input, "Hamburg;12.0\n").unwrap();

    let err = Aggregator::new().batch_size(0).run_path(&input).unwrap_err();
    assert!(matches!(err, TallyError::InvalidParameter { .. }));
}

#[test]
fn test_cli_exits_nonzero_on_missing_input() {
    let output = Command::new(tally_binary())
        .args(["aggregate", "-i", "/no/such/measurements.txt"])
        .output()
        .expect("failed to run tally");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot open input"), "stderr: {stderr}");
}

#[test]
fn test_cli_rejects_zero_batch_size() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("measurements.txt");
    std::fs::write(&input, "Hamburg;12.0\n").unwrap();

    let output = Command::new(tally_binary())
        .args(["aggregate", "--batch-size", "0", "-i"])
        .arg(&input)
        .output()
        .expect("failed to run tally");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--batch-size"), "stderr: {stderr}");
}

#[test]
fn test_directory_as_input_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    // Reading a directory errors either at open or at first read; both are
    // fatal and must not produce results
    let result = Aggregator::new().run_path(dir.path());
    assert!(result.is_err());
}
