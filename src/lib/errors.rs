//! Custom error types for tally operations.

use thiserror::Error;

/// Result type alias for tally operations
pub type Result<T> = std::result::Result<T, TallyError>;

/// Error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// The input source could not be opened at all
    #[error("Cannot open input '{path}': {source}")]
    SourceUnavailable {
        /// Path to the input that failed to open
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// An I/O error occurred while reading the input mid-stream
    #[error("Error reading input: {source}")]
    SourceRead {
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A zero-count entry was observed while merging partial results.
    /// Unreachable through the accumulator contract; surfaced rather than
    /// silently producing wrong statistics.
    #[error("Merge inconsistency: key '{key}' has a zero observation count")]
    MergeInconsistency {
        /// The offending key
        key: String,
    },
}
