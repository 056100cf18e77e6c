//! Silence error definitions.

use thiserror::Error;

/// Errors from silence detection and interval pairing.
#[derive(Debug, Error)]
pub enum SilenceError {
    /// The boundary sequence broke the start/end alternation.
    #[error("silence event sequence desynchronized at event {index}: {message}")]
    Desynchronized { index: usize, message: String },

    /// The sequence ended inside a silence region (odd boundary count).
    #[error("unpaired silence start at {at_secs}s")]
    UnpairedStart { at_secs: f64 },

    /// The external detector exited with a failure.
    #[error("silence detection failed with exit code {exit_code}: {message}")]
    DetectorFailed { exit_code: i32, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for silence operation results.
pub type SilenceResult<T> = Result<T, SilenceError>;
