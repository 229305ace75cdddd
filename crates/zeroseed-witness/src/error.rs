//! Error types for witnessing operations

use thiserror::Error;

/// Errors that can occur while recording or flushing marks
#[derive(Error, Debug)]
pub enum WitnessError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// A flush exhausted its retry budget; the buffer is left intact
    #[error("Flush failed after {attempts} attempt(s): {last_error}")]
    FlushRetriesExhausted {
        /// How many persistence attempts were made
        attempts: u32,
        /// The final storage error, stringified
        last_error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
