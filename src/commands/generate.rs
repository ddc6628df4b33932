//! Generate a synthetic measurement file.
//!
//! Thin wrapper around [`tally_lib::simulate`] for producing test and
//! benchmark inputs. Seeded runs are byte-for-byte reproducible.

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tally_lib::logging::{OperationTimer, format_count};
use tally_lib::simulate::MeasurementGenerator;

use crate::commands::command::Command;

/// Generate a synthetic measurement file.
#[derive(Debug, Parser)]
#[command(
    name = "generate",
    about = "\x1b[36mGenerate a synthetic key;value measurement file\x1b[0m",
    long_about = r"
Generate a synthetic measurement file with one <key>;<value> line per record.

Values are drawn from a per-station normal distribution and rendered with
one fractional digit. Runs with the same --seed produce identical files.

EXAMPLES:

  # One million records over the built-in station table
  tally generate -o measurements.txt --records 1000000

  # Reproducible input with more distinct keys
  tally generate -o measurements.txt --records 1000000 --stations 400 --seed 42
"
)]
pub struct Generate {
    /// Output measurement file.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Number of records to write.
    #[arg(short = 'n', long = "records", default_value = "1000000")]
    pub records: u64,

    /// Number of distinct keys to draw from.
    #[arg(long = "stations", default_value = "44")]
    pub stations: usize,

    /// Seed for reproducible output; omit for OS entropy.
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl Command for Generate {
    fn execute(&self, command_line: &str) -> Result<()> {
        if self.stations == 0 {
            bail!("--stations must be greater than 0");
        }

        info!("Command line: {command_line}");
        info!("Output: {}", self.output.display());
        info!("Records: {}", format_count(self.records));
        info!("Stations: {}", self.stations);
        if let Some(seed) = self.seed {
            info!("Seed: {seed}");
        }

        let timer = OperationTimer::new("Generating measurements");
        let file = File::create(&self.output)
            .with_context(|| format!("Failed to create output: {}", self.output.display()))?;
        let mut writer = BufWriter::new(file);

        let mut generator = MeasurementGenerator::new(self.stations, self.seed);
        let written = generator
            .write_measurements(&mut writer, self.records)
            .with_context(|| format!("Failed to write output: {}", self.output.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write output: {}", self.output.display()))?;

        timer.log_completion(written);
        Ok(())
    }
}
