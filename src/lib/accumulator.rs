//! Per-worker statistics accumulation.
//!
//! Each worker owns exactly one [`Accumulator`] for its entire active
//! lifetime, so the hot observe loop runs with no synchronization at all.
//! Cross-worker combination happens later, in [`crate::merge`], after the
//! accumulators are frozen.

use crate::record::{self, MalformedRecord};
use crate::stats::KeyStats;
use ahash::RandomState;
use hashbrown::HashMap;

/// Exclusively-owned map from key to running statistics, plus per-worker
/// record counters. Keys are cloned only when first seen.
#[derive(Debug)]
pub struct Accumulator {
    stats: HashMap<String, KeyStats, RandomState>,
    /// Well-formed records observed.
    records: u64,
    /// Lines that failed to parse and were skipped.
    malformed: u64,
}

impl Accumulator {
    /// Create an accumulator using the given hasher state.
    ///
    /// All accumulators in one pipeline run share a `RandomState` so the merge
    /// phase can partition the key space consistently across partials.
    #[must_use]
    pub fn with_hasher(hasher: RandomState) -> Self {
        Self { stats: HashMap::with_hasher(hasher), records: 0, malformed: 0 }
    }

    /// Fold one observation for `key` into the map.
    #[inline]
    pub fn observe(&mut self, key: &str, value: i64) {
        self.records += 1;
        self.stats
            .entry_ref(key)
            .and_modify(|s| s.observe(value))
            .or_insert_with(|| KeyStats::new(value));
    }

    /// Parse one raw line and observe it, counting (not propagating) malformed
    /// lines. Returns the parse failure, if any, for diagnostics.
    #[inline]
    pub fn observe_line(&mut self, line: &[u8]) -> Option<MalformedRecord> {
        match record::parse_line(line) {
            Ok(rec) => {
                self.observe(rec.key, rec.value);
                None
            }
            Err(reason) => {
                self.malformed += 1;
                Some(reason)
            }
        }
    }

    /// Fold another accumulator into this one, combining statistics per key
    /// and summing the record counters. The pipeline merges frozen maps via
    /// [`crate::merge::merge_partials`] instead; this is the in-place variant
    /// for combining live accumulators.
    pub fn merge_from(&mut self, other: &Accumulator) {
        for (key, stats) in &other.stats {
            self.stats.entry_ref(key.as_str()).and_modify(|s| s.merge(stats)).or_insert(*stats);
        }
        self.records += other.records;
        self.malformed += other.malformed;
    }

    /// The underlying key → statistics map.
    #[must_use]
    pub fn stats(&self) -> &HashMap<String, KeyStats, RandomState> {
        &self.stats
    }

    /// Freeze this accumulator, handing its map to the merge phase. The map
    /// is read-only from here on.
    #[must_use]
    pub fn into_stats(self) -> HashMap<String, KeyStats, RandomState> {
        self.stats
    }

    /// Number of well-formed records observed.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Number of malformed lines skipped.
    #[must_use]
    pub fn malformed(&self) -> u64 {
        self.malformed
    }

    /// Number of distinct keys seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True if no key has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
