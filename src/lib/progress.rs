//! Progress tracking utilities
//!
//! Thread-safe record-count tracker that logs each time the count crosses an
//! interval boundary. Workers share one tracker and add whole batches at a
//! time.

use crate::logging::format_count;
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default interval between progress logs, in records.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000_000;

/// Thread-safe progress tracker for logging progress at regular intervals.
pub struct ProgressTracker {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Records counted so far.
    count: AtomicU64,
}

impl ProgressTracker {
    /// Create a tracker with the default interval.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: DEFAULT_PROGRESS_INTERVAL, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add to the count and log once per interval boundary crossed.
    ///
    /// Returns `true` if the resulting count lands exactly on an interval,
    /// which tells [`log_final`](Self::log_final) whether a closing message
    /// is still needed.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        if additional == 0 {
            let count = self.count.load(Ordering::Relaxed);
            return count > 0 && count % self.interval == 0;
        }

        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let new_count = prev + additional;

        for i in (prev / self.interval + 1)..=(new_count / self.interval) {
            info!("{} {}", self.message, format_count(i * self.interval));
        }

        new_count % self.interval == 0
    }

    /// Log the final count unless the last `log_if_needed` already did.
    pub fn log_final(&self) {
        if !self.log_if_needed(0) {
            let count = self.count.load(Ordering::Relaxed);
            if count > 0 {
                info!("{} {} (complete)", self.message, format_count(count));
            }
        }
    }

    /// The current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
