//! End-to-end tests for the `tally aggregate` command.

use crate::helpers::{tally_binary, write_measurements};
use std::process::Command;
use tempfile::TempDir;

const EXAMPLE: &[&str] = &["Hamburg;12.0", "Hamburg;14.5", "Berlin;-3.2", "Hamburg;9.8"];

#[test]
fn test_aggregate_writes_expected_tsv() {
    let dir = TempDir::new().unwrap();
    let input = write_measurements(dir.path(), "measurements.txt", EXAMPLE);
    let output = dir.path().join("summary.tsv");

    let status = Command::new(tally_binary())
        .args(["aggregate", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("failed to run tally");
    assert!(status.success());

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "key\tmin\tmax\tmean\tcount");
    assert_eq!(lines[1], "Berlin\t-3.2\t-3.2\t-3.2\t1");
    assert_eq!(lines[2], "Hamburg\t9.8\t14.5\t12.1\t3");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_aggregate_verbose_prints_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_measurements(dir.path(), "measurements.txt", EXAMPLE);

    let output = Command::new(tally_binary())
        .args(["aggregate", "--verbose", "-i"])
        .arg(&input)
        .output()
        .expect("failed to run tally");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hamburg: min=9.8, max=14.5, mean=12.1, count=3"), "stdout: {stdout}");
    assert!(stdout.contains("Berlin: min=-3.2, max=-3.2, mean=-3.2, count=1"), "stdout: {stdout}");
}

#[test]
fn test_aggregate_accepts_pipeline_tuning() {
    let dir = TempDir::new().unwrap();
    let input = write_measurements(dir.path(), "measurements.txt", EXAMPLE);
    let output = dir.path().join("summary.tsv");

    let status = Command::new(tally_binary())
        .args(["aggregate", "--workers", "3", "--batch-size", "1", "--queue-capacity", "2", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("failed to run tally");
    assert!(status.success());

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("Hamburg\t9.8\t14.5\t12.1\t3"));
}
