//! Per-key running statistics.
//!
//! `min`/`max` are scaled integers (tenths) so extrema stay exact; the mean is
//! maintained with the Welford-style online update, which bounds intermediate
//! magnitude instead of accumulating a raw sum that drifts (and overflows) over
//! billions of observations. Two independently-computed partials combine with
//! the exact two-group rule, which is associative and commutative per key, so
//! merge order never changes the result.

use crate::record::SCALE;
use serde::Serialize;

/// Running statistics for one key: exact extrema in tenths, an online mean
/// over the scaled values, and the observation count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyStats {
    /// Minimum observed value in tenths.
    pub min: i64,
    /// Maximum observed value in tenths.
    pub max: i64,
    /// Running mean of the scaled values.
    pub mean: f64,
    /// Number of observations.
    pub count: u64,
}

impl KeyStats {
    /// Statistics after a single observation.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self { min: value, max: value, mean: value as f64, count: 1 }
    }

    /// Fold one more observation in.
    #[inline]
    pub fn observe(&mut self, value: i64) {
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.mean += (value as f64 - self.mean) / self.count as f64;
    }

    /// Combine another partial into this one using the two-group merge rule:
    /// min of mins, max of maxes, sum of counts, count-weighted mean. Exact
    /// for combining two independently-computed running means.
    pub fn merge(&mut self, other: &KeyStats) {
        let total = self.count + other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.mean = (self.mean * self.count as f64 + other.mean * other.count as f64)
            / total as f64;
        self.count = total;
    }

    /// Minimum at the source scale.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min as f64 / SCALE
    }

    /// Maximum at the source scale.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max as f64 / SCALE
    }

    /// Mean at the source scale, rounded to one decimal with ties away from
    /// zero (the scale of the input).
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        self.mean.round() / SCALE
    }
}
