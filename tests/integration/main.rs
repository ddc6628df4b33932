//! Integration tests for the tally library and CLI.
//!
//! These tests validate end-to-end workflows that span multiple modules,
//! ensuring that module interactions work correctly.

mod helpers;
mod test_aggregate_command;
mod test_error_paths;
mod test_generate_command;
mod test_malformed_input;
mod test_pipeline_scaling;
