//! Error types for bb-output.

use bb_core::Stage;
use thiserror::Error;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A row's server layout differs from the header written at creation.
    #[error("row {row} has {found} {stage} servers but the header has {expected}")]
    ServerLayout {
        row:      u64,
        stage:    Stage,
        expected: usize,
        found:    usize,
    },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
