#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: Scaled-integer/float conversions intentionally cast between numeric types
// - missing_*_doc: Documentation improvements tracked separately
// - items_after_statements: Some test code uses late item declarations
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::items_after_statements,
    clippy::uninlined_format_args
)]

//! # tally - Parallel per-key statistics over delimited measurement files
//!
//! This library aggregates very large `key;value` text files (up to billions
//! of records) into per-key minimum, maximum, mean, and count, using a
//! backpressure-bounded map-reduce pipeline.
//!
//! ## Overview
//!
//! - **[`record`]** - Line parsing into `(key, scaled value)` records
//! - **[`stats`]** - Per-key running statistics and the two-group merge rule
//! - **[`accumulator`]** - Per-worker unsynchronized key → stats maps
//! - **[`batcher`]** - Grouping lines into fixed-size units of work
//! - **[`pipeline`]** - The producer → bounded queue → worker pool coordinator
//! - **[`merge`]** - Key-space-partitioned combination of partial results
//! - **[`summary`]** - Final results, run counters, and TSV output
//! - **[`simulate`]** - Deterministic synthetic measurement files
//!
//! ## Quick Start
//!
//! ```no_run
//! use tally_lib::pipeline::Aggregator;
//!
//! # fn main() -> tally_lib::errors::Result<()> {
//! let summary = Aggregator::new().workers(8).run_path("measurements.txt")?;
//! for row in summary.rows() {
//!     println!("{}: min={}, max={}, mean={}", row.key, row.min, row.max, row.mean);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! Each worker owns its accumulator for its whole active lifetime, so the hot
//! observe loop needs no locks; all cross-worker combination is deferred to an
//! explicit merge phase over the frozen partials. The bounded batch queue is
//! the only shared structure, and its capacity bounds peak memory. Values are
//! carried as scaled integers (tenths) so min/max stay exact; the mean uses an
//! online update whose partials merge with the count-weighted rule.

pub mod accumulator;
pub mod batcher;
pub mod errors;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod simulate;
pub mod stats;
pub mod summary;

pub use accumulator::Accumulator;
pub use errors::{Result, TallyError};
pub use pipeline::Aggregator;
pub use stats::KeyStats;
pub use summary::{AggregateStats, AggregateSummary, KeySummary};
