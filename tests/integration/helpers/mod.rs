//! Helper utilities for integration tests.

use std::path::{Path, PathBuf};
use tally_lib::pipeline::Aggregator;
use tally_lib::summary::AggregateSummary;

/// Path to the compiled tally binary.
pub fn tally_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tally"))
}

/// Write `lines` (without terminators) to `dir/name` as a measurement file.
pub fn write_measurements(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).expect("failed to write test input");
    path
}

/// Aggregate `path` with the given pipeline configuration.
pub fn aggregate(path: &Path, workers: usize, batch_size: usize) -> AggregateSummary {
    Aggregator::new()
        .workers(workers)
        .batch_size(batch_size)
        .run_path(path)
        .expect("aggregation failed")
}

/// Assert two summaries agree on every key: exact min/max/count, mean within
/// relative tolerance.
pub fn assert_summaries_equal(expected: &AggregateSummary, actual: &AggregateSummary, label: &str) {
    assert_eq!(actual.len(), expected.len(), "{label}: key count differs");
    assert_eq!(actual.stats().records, expected.stats().records, "{label}: record count differs");
    for (key, stats) in expected.results() {
        let other = actual.get(key).unwrap_or_else(|| panic!("{label}: key {key} missing"));
        assert_eq!(other.min, stats.min, "{label}: min differs for {key}");
        assert_eq!(other.max, stats.max, "{label}: max differs for {key}");
        assert_eq!(other.count, stats.count, "{label}: count differs for {key}");
        let tolerance = 1e-6 * stats.mean.abs().max(1.0);
        assert!(
            (other.mean - stats.mean).abs() <= tolerance,
            "{label}: mean differs for {key}: {} vs {}",
            other.mean,
            stats.mean
        );
    }
}
