//! End-to-end tests for the `tally generate` command and the
//! generate-then-aggregate workflow.

use crate::helpers::{aggregate, tally_binary};
use std::process::Command;
use tempfile::TempDir;

fn generate(path: &std::path::Path, records: u64, stations: usize, seed: u64) {
    let status = Command::new(tally_binary())
        .args([
            "generate",
            "--records",
            &records.to_string(),
            "--stations",
            &stations.to_string(),
            "--seed",
            &seed.to_string(),
            "-o",
        ])
        .arg(path)
        .status()
        .expect("failed to run tally");
    assert!(status.success());
}

#[test]
fn test_generate_is_deterministic_under_seed() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    generate(&a, 2000, 20, 42);
    generate(&b, 2000, 20, 42);
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn test_generated_file_aggregates_cleanly() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("measurements.txt");
    generate(&input, 10_000, 44, 7);

    let summary = aggregate(&input, 4, 1000);
    assert_eq!(summary.stats().records, 10_000);
    assert_eq!(summary.stats().malformed, 0);
    assert_eq!(summary.len(), 44);
    let total: u64 = summary.results().values().map(|s| s.count).sum();
    assert_eq!(total, 10_000);
}

#[test]
fn test_generated_stats_respect_invariants() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("measurements.txt");
    generate(&input, 5000, 10, 99);

    let summary = aggregate(&input, 2, 500);
    for (key, stats) in summary.results() {
        assert!(stats.count >= 1, "{key}");
        assert!(stats.min as f64 <= stats.mean, "{key}");
        assert!(stats.mean <= stats.max as f64, "{key}");
    }
}
