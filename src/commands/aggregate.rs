//! Aggregate a measurement file into per-key statistics.
//!
//! Runs the parallel map-reduce pipeline over a `key;value` file and reports
//! per-key min/max/mean/count, optionally writing the sorted rows to TSV.

use anyhow::{Result, bail};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tally_lib::logging::{OperationTimer, format_count, format_percent, format_rate};
use tally_lib::pipeline::Aggregator;
use tally_lib::progress::DEFAULT_PROGRESS_INTERVAL;

use crate::commands::command::Command;

/// Aggregate per-key statistics from a measurement file.
///
/// Streams the input through a bounded-queue worker pool and merges the
/// per-worker partial statistics into one final result set.
#[derive(Debug, Parser)]
#[command(
    name = "aggregate",
    about = "\x1b[36mAggregate per-key min/max/mean/count from a measurement file\x1b[0m",
    long_about = r"
Aggregate per-key statistics from a delimited measurement file.

Each input line has the shape <key>;<value> where <value> is a decimal
number with one fractional digit (possibly negative). For every distinct
key the output reports the minimum, maximum, arithmetic mean (rounded to
one decimal), and record count.

Lines that do not parse (wrong field count, non-numeric value) are skipped
and counted; they never abort the run. A mid-stream read error aborts the
whole run with no partial output.

EXAMPLES:

  # Aggregate with one worker per core
  tally aggregate -i measurements.txt

  # Write the per-key table to TSV and print it
  tally aggregate -i measurements.txt -o summary.tsv --verbose

  # Tune the pipeline
  tally aggregate -i measurements.txt --workers 16 --batch-size 100000
"
)]
pub struct Aggregate {
    /// Input measurement file.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Optional output TSV file with one row per key, sorted by key.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Lines per unit of work handed to the worker pool.
    #[arg(long = "batch-size", default_value = "65536")]
    pub batch_size: usize,

    /// Number of ingest workers (0 = available parallelism).
    #[arg(short = 't', long = "workers", default_value = "0")]
    pub workers: usize,

    /// Batches the queue holds before the reader suspends (0 = 2 x workers).
    #[arg(long = "queue-capacity", default_value = "0")]
    pub queue_capacity: usize,

    /// Records between progress log lines.
    #[arg(long = "progress-interval", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Print the per-key statistics to stdout.
    #[arg(short = 'v', long = "verbose", default_value = "false")]
    pub verbose: bool,
}

impl Command for Aggregate {
    fn execute(&self, command_line: &str) -> Result<()> {
        if self.batch_size == 0 {
            bail!("--batch-size must be greater than 0");
        }
        if self.progress_interval == 0 {
            bail!("--progress-interval must be greater than 0");
        }

        info!("Command line: {command_line}");
        info!("Input: {}", self.input.display());
        if let Some(output) = &self.output {
            info!("Output: {}", output.display());
        }
        info!("Batch size: {}", format_count(self.batch_size as u64));
        if self.workers == 0 {
            info!("Workers: auto");
        } else {
            info!("Workers: {}", self.workers);
        }

        let timer = OperationTimer::new("Aggregating measurements");
        let summary = Aggregator::new()
            .batch_size(self.batch_size)
            .workers(self.workers)
            .queue_capacity(self.queue_capacity)
            .progress_interval(self.progress_interval)
            .run_path(&self.input)?;

        if self.verbose {
            for row in summary.rows() {
                println!(
                    "{}: min={:.1}, max={:.1}, mean={:.1}, count={}",
                    row.key, row.min, row.max, row.mean, row.count
                );
            }
        }

        if let Some(output) = &self.output {
            summary.write_tsv(output)?;
            info!("Wrote {} rows to {}", format_count(summary.len() as u64), output.display());
        }

        let stats = summary.stats();
        let total_lines = stats.records + stats.malformed;
        info!("=== Summary ===");
        info!("Records aggregated: {}", format_count(stats.records));
        if total_lines > 0 {
            info!(
                "Malformed lines skipped: {} ({})",
                format_count(stats.malformed),
                format_percent(stats.malformed as f64 / total_lines as f64, 2)
            );
        }
        info!("Distinct keys: {}", format_count(summary.len() as u64));
        info!("Batches processed: {}", format_count(stats.batches));
        info!("Throughput: {}", format_rate(total_lines, timer.elapsed()));
        timer.log_completion(stats.records);

        Ok(())
    }
}
