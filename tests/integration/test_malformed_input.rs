//! Malformed-line robustness: bad lines are skipped and never change the
//! statistics of the well-formed lines.

use crate::helpers::{aggregate, assert_summaries_equal, write_measurements};
use tempfile::TempDir;

const CLEAN: &[&str] = &["Hamburg;12.0", "Hamburg;14.5", "Berlin;-3.2", "Hamburg;9.8"];

const DIRTY: &[&str] = &[
    "BadLine",
    "Hamburg;12.0",
    "Hamburg;14.5",
    "Paris;notanumber",
    "Berlin;-3.2",
    "",
    ";-1.0",
    "Oslo;1.0;2.0",
    "Hamburg;9.8",
];

#[test]
fn test_results_identical_with_bad_lines_removed() {
    let dir = TempDir::new().unwrap();
    let clean = write_measurements(dir.path(), "clean.txt", CLEAN);
    let dirty = write_measurements(dir.path(), "dirty.txt", DIRTY);

    for workers in [1, 4, 17] {
        let expected = aggregate(&clean, workers, 2);
        let actual = aggregate(&dirty, workers, 2);
        assert_summaries_equal(&expected, &actual, &format!("workers={workers}"));
        assert_eq!(actual.stats().malformed, 5);
        assert_eq!(actual.stats().records, 4);
    }
}

#[test]
fn test_bad_lines_do_not_create_keys() {
    let dir = TempDir::new().unwrap();
    let dirty = write_measurements(dir.path(), "dirty.txt", DIRTY);
    let summary = aggregate(&dirty, 2, 100);

    assert_eq!(summary.len(), 2);
    assert!(summary.get("Paris").is_none());
    assert!(summary.get("Oslo").is_none());
    assert!(summary.get("BadLine").is_none());
}

#[test]
fn test_all_malformed_input_yields_empty_results() {
    let dir = TempDir::new().unwrap();
    let input = write_measurements(dir.path(), "junk.txt", &["no delimiter", "a;b", ";;"]);
    let summary = aggregate(&input, 2, 100);

    assert!(summary.is_empty());
    assert_eq!(summary.stats().records, 0);
    assert_eq!(summary.stats().malformed, 3);
}
