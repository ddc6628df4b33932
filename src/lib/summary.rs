//! Final aggregation results and run counters.
//!
//! The pipeline hands back one [`AggregateSummary`]: the merged key → stats
//! map plus counters for the run. Presentation concerns (row ordering at the
//! source scale, TSV output) live here, outside the hot path.

use crate::merge::PartialResults;
use crate::stats::KeyStats;
use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use itertools::Itertools;
use serde::Serialize;
use std::path::Path;

/// Counters describing one pipeline run.
#[derive(Default, Debug, Clone, Copy)]
pub struct AggregateStats {
    /// Well-formed records aggregated.
    pub records: u64,
    /// Malformed lines skipped.
    pub malformed: u64,
    /// Batches delivered through the queue.
    pub batches: u64,
}

/// One output row at the source scale: min/max/mean rescaled from tenths,
/// mean rounded to one decimal with ties away from zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeySummary {
    /// The grouping key.
    pub key: String,
    /// Minimum observed value.
    pub min: f64,
    /// Maximum observed value.
    pub max: f64,
    /// Arithmetic mean, rounded to one decimal.
    pub mean: f64,
    /// Number of records observed for this key.
    pub count: u64,
}

/// The final, immutable result of a pipeline run.
#[derive(Debug)]
pub struct AggregateSummary {
    results: PartialResults,
    stats: AggregateStats,
}

impl AggregateSummary {
    /// Build a summary from the merged map and run counters.
    #[must_use]
    pub fn new(results: PartialResults, stats: AggregateStats) -> Self {
        Self { results, stats }
    }

    /// Run counters for this pipeline run.
    #[must_use]
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Statistics for one key, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&KeyStats> {
        self.results.get(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if no key was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The merged key → statistics map.
    #[must_use]
    pub fn results(&self) -> &PartialResults {
        &self.results
    }

    /// Output rows at the source scale, sorted by key for deterministic
    /// presentation.
    #[must_use]
    pub fn rows(&self) -> Vec<KeySummary> {
        self.results
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(key, stats)| KeySummary {
                key: key.clone(),
                min: stats.min_value(),
                max: stats.max_value(),
                mean: stats.mean_value(),
                count: stats.count,
            })
            .collect()
    }

    /// Write the sorted rows to a TSV file.
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        DelimFile::default()
            .write_tsv(&path, self.rows())
            .with_context(|| format!("Failed to write summary: {}", path.display()))
    }
}
