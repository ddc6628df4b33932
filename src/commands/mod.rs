//! CLI command implementations for tally.
//!
//! This module contains all the command implementations for the tally CLI tool.
//! Each submodule implements a specific command.
//!
//! - [`aggregate`] - Aggregate a measurement file into per-key statistics
//! - [`generate`] - Write a synthetic measurement file for testing and benchmarking

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::too_many_lines,
    clippy::uninlined_format_args
)]

pub mod aggregate;
pub mod command;
pub mod generate;
