//! Scaling properties: results are invariant to worker count, batch size,
//! and merge parallelism.

use crate::helpers::{aggregate, assert_summaries_equal};
use std::path::PathBuf;
use tally_lib::pipeline::Aggregator;
use tempfile::TempDir;

/// Write a fixed synthetic input: 20,000 lines over 61 keys with values
/// spanning negative and positive tenths.
fn fixed_input(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("fixed.txt");
    let content: String = (0..20_000)
        .map(|i| {
            let whole = (i % 140) - 70;
            let tenth = i % 10;
            if whole < 0 {
                format!("key{};-{}.{}\n", i % 61, -whole, tenth)
            } else {
                format!("key{};{}.{}\n", i % 61, whole, tenth)
            }
        })
        .collect();
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_worker_count_sweep() {
    let dir = TempDir::new().unwrap();
    let input = fixed_input(dir.path());
    let reference = aggregate(&input, 1, 100);

    for workers in [1, 4, 17] {
        let summary = aggregate(&input, workers, 100);
        assert_summaries_equal(&reference, &summary, &format!("workers={workers}"));
    }
}

#[test]
fn test_batch_size_by_worker_count_grid() {
    let dir = TempDir::new().unwrap();
    let input = fixed_input(dir.path());
    let reference = aggregate(&input, 1, 100);

    for batch_size in [1, 100, 100_000] {
        for workers in [1, 2, 16] {
            let summary = aggregate(&input, workers, batch_size);
            assert_summaries_equal(&reference, &summary, &format!("b={batch_size} w={workers}"));
        }
    }
}

#[test]
fn test_merge_reducer_sweep() {
    let dir = TempDir::new().unwrap();
    let input = fixed_input(dir.path());
    let reference = aggregate(&input, 4, 100);

    for reducers in [1, 2, 8, 17] {
        let summary = Aggregator::new()
            .workers(4)
            .batch_size(100)
            .merge_reducers(reducers)
            .run_path(&input)
            .unwrap();
        assert_summaries_equal(&reference, &summary, &format!("reducers={reducers}"));
    }
}

#[test]
fn test_single_key_many_values_mean_accuracy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("single.txt");
    // Values 0.0, 0.1, ..., 999.8: the true mean is exactly 499.9
    let content: String = (0..9999).map(|i| format!("OnlyKey;{}.{}\n", i / 10, i % 10)).collect();
    std::fs::write(&path, content).unwrap();

    for workers in [1, 8] {
        let summary = aggregate(&path, workers, 128);
        let stats = summary.get("OnlyKey").unwrap();
        assert_eq!(stats.count, 9999);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 9998);
        let true_mean = 4999.0;
        assert!((stats.mean - true_mean).abs() <= 1e-6 * true_mean);
        assert!((stats.mean_value() - 499.9).abs() < f64::EPSILON);
    }
}
