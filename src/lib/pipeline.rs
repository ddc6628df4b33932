//! The parallel aggregation pipeline.
//!
//! One producer thread batches lines into a bounded queue; W worker threads
//! each own an [`Accumulator`] and fold batches into it with no cross-worker
//! coordination; a final merge phase combines the frozen partials. The
//! bounded queue is the only shared structure: the producer suspends when it
//! is full, which bounds peak memory to O(queue capacity × batch size).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────────┐    ┌───────────┐    ┌────────┐
//! │ Producer │───>│ Bounded queue │───>│ W workers │───>│ Merger │
//! │ (batches)│    │  (backpressure)│   │ (observe) │    │ (fold) │
//! └──────────┘    └───────────────┘    └───────────┘    └────────┘
//! ```
//!
//! The run either completes with a full [`AggregateSummary`] or fails with
//! the first fatal error; there is no partial-success mode. On a mid-stream
//! read error the producer closes the queue and raises the abort flag, the
//! workers stop consuming without draining, and the partials are discarded.

use crate::accumulator::Accumulator;
use crate::batcher::{Batch, Batcher, DEFAULT_BATCH_SIZE};
use crate::errors::{Result, TallyError};
use crate::merge::{self, PartialResults};
use crate::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressTracker};
use crate::summary::{AggregateStats, AggregateSummary};
use ahash::RandomState;
use crossbeam_channel::bounded;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Buffer size for reading the input source.
const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Lifecycle of one pipeline run. `Idle` is the only start state; `Done` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Constructed, not yet started.
    Idle,
    /// Producer and workers are running.
    Ingesting,
    /// Source exhausted; workers finishing queued batches.
    Draining,
    /// Folding frozen partials into the final map.
    Merging,
    /// Complete results published.
    Done,
    /// Aborted on a fatal error; partials discarded.
    Failed,
}

impl PipelineState {
    /// Whether `next` is a legal successor of this state.
    #[must_use]
    pub fn can_transition(self, next: PipelineState) -> bool {
        use PipelineState::{Done, Draining, Failed, Idle, Ingesting, Merging};
        matches!(
            (self, next),
            (Idle, Ingesting)
                | (Ingesting, Draining)
                | (Draining, Merging)
                | (Merging, Done)
                | (Ingesting | Draining | Merging, Failed)
        )
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(self.can_transition(next), "invalid transition {self:?} -> {next:?}");
        *self = next;
    }
}

/// Configurable map-reduce aggregator over `key;value` line sources.
///
/// ```no_run
/// use tally_lib::pipeline::Aggregator;
///
/// # fn main() -> tally_lib::errors::Result<()> {
/// let summary = Aggregator::new().workers(8).batch_size(100_000).run_path("measurements.txt")?;
/// println!("{} keys", summary.len());
/// # Ok(())
/// # }
/// ```
pub struct Aggregator {
    /// Lines per unit of work.
    batch_size: usize,
    /// Ingest worker threads; 0 means available parallelism.
    workers: usize,
    /// Batches the queue holds before the producer suspends; 0 means 2 × workers.
    queue_capacity: usize,
    /// Reducer tasks for the merge phase; 0 means the worker count.
    merge_reducers: usize,
    /// Records between progress logs.
    progress_interval: u64,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            workers: 0,
            queue_capacity: 0,
            merge_reducers: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl Aggregator {
    /// Create an aggregator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of lines per batch.
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the ingest worker count (0 = available parallelism).
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the queue capacity in batches (0 = 2 × workers).
    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the merge reducer count (0 = worker count, 1 = sequential merge).
    #[must_use]
    pub fn merge_reducers(mut self, reducers: usize) -> Self {
        self.merge_reducers = reducers;
        self
    }

    /// Set the number of records between progress logs.
    #[must_use]
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Open `path` and aggregate it.
    pub fn run_path<P: AsRef<Path>>(&self, path: P) -> Result<AggregateSummary> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TallyError::SourceUnavailable {
            path: path.display().to_string(),
            source: e,
        })?;
        self.run(BufReader::with_capacity(READ_BUFFER_SIZE, file))
    }

    /// Aggregate a line source to completion.
    ///
    /// Returns the complete summary, or the first fatal error with all
    /// partial state discarded.
    pub fn run<R: BufRead + Send>(&self, reader: R) -> Result<AggregateSummary> {
        if self.batch_size == 0 {
            return Err(TallyError::InvalidParameter {
                parameter: "batch_size".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        let workers = resolve_workers(self.workers);
        let capacity = if self.queue_capacity == 0 { workers * 2 } else { self.queue_capacity };
        let reducers = if self.merge_reducers == 0 { workers } else { self.merge_reducers };

        let mut state = PipelineState::Idle;
        state.advance(PipelineState::Ingesting);
        debug!(
            "Pipeline starting: {workers} workers, batch size {}, queue capacity {capacity}",
            self.batch_size
        );

        // One hasher state for the whole run so the merge phase can partition
        // the key space consistently across partials.
        let hasher = RandomState::new();
        let abort = AtomicBool::new(false);
        let tracker =
            ProgressTracker::new("Aggregated records").with_interval(self.progress_interval);
        let (tx, rx) = bounded::<Batch>(capacity);

        let (produced, accumulators) = thread::scope(|scope| {
            let abort = &abort;
            let tracker = &tracker;
            let batch_size = self.batch_size;

            // Single producer: owns the reader and the sender; dropping the
            // sender on exit is what closes the queue.
            let producer = scope.spawn(move || -> Result<u64> {
                let mut batches = 0u64;
                for item in Batcher::new(reader, batch_size) {
                    match item {
                        Ok(batch) => {
                            if tx.send(batch).is_err() {
                                // All workers gone; nothing left to feed.
                                break;
                            }
                            batches += 1;
                        }
                        Err(e) => {
                            abort.store(true, Ordering::Relaxed);
                            return Err(TallyError::SourceRead { source: e });
                        }
                    }
                }
                Ok(batches)
            });

            let worker_handles: Vec<_> = (0..workers)
                .map(|_| {
                    let rx = rx.clone();
                    let mut acc = Accumulator::with_hasher(hasher.clone());
                    scope.spawn(move || {
                        for batch in rx.iter() {
                            if abort.load(Ordering::Relaxed) {
                                break;
                            }
                            let lines = batch.len() as u64;
                            for line in &batch {
                                acc.observe_line(line);
                            }
                            tracker.log_if_needed(lines);
                        }
                        acc
                    })
                })
                .collect();
            drop(rx);

            let produced = producer.join().expect("producer thread panicked");
            if produced.is_ok() {
                state.advance(PipelineState::Draining);
            }
            let accumulators: Vec<Accumulator> = worker_handles
                .into_iter()
                .map(|w| w.join().expect("worker thread panicked"))
                .collect();
            (produced, accumulators)
        });

        let batches = match produced {
            Ok(batches) => batches,
            Err(e) => {
                state.advance(PipelineState::Failed);
                info!("Pipeline failed during ingest; discarding partial results");
                return Err(e);
            }
        };
        tracker.log_final();

        let mut stats = AggregateStats { batches, ..AggregateStats::default() };
        let mut partials: Vec<PartialResults> = Vec::with_capacity(accumulators.len());
        for acc in accumulators {
            stats.records += acc.records();
            stats.malformed += acc.malformed();
            partials.push(acc.into_stats());
        }

        state.advance(PipelineState::Merging);
        debug!("Merging {} partial result sets with {reducers} reducers", partials.len());
        let results = match merge::merge_partials(&partials, reducers) {
            Ok(results) => results,
            Err(e) => {
                state.advance(PipelineState::Failed);
                return Err(e);
            }
        };

        state.advance(PipelineState::Done);
        debug_assert_eq!(state, PipelineState::Done);
        Ok(AggregateSummary::new(results, stats))
    }
}

/// Resolve a worker count of 0 to the machine's available parallelism.
fn resolve_workers(workers: usize) -> usize {
    if workers > 0 {
        workers
    } else {
        thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }
}
