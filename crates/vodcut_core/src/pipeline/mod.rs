//! Per-asset pipelines and run reporting.
//!
//! Three flows share the same shape - load or detect, decide, dispatch:
//!
//! - split: chapter table -> segment plan -> one encode per pending task
//! - trim: silence detection -> interval pairing -> window selection -> cut
//! - convert: codec probe -> remux-vs-re-encode decision -> dispatch
//!
//! Every flow processes one asset per call and reports item outcomes;
//! failures are surfaced once and never abort the surrounding run loop.

mod convert;
mod report;
mod split;
mod trim;

pub use convert::ConvertPipeline;
pub use report::{ItemOutcome, RunReport};
pub use split::{ChapterSource, SplitPipeline};
pub use trim::{default_trim_output, TrimPipeline};

use thiserror::Error;

use crate::chapters::ChapterError;
use crate::encode::EncodeError;
use crate::probe::ProbeError;
use crate::silence::SilenceError;

/// Errors that stop processing of a single asset.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Chapters(#[from] ChapterError),

    #[error(transparent)]
    Silence(#[from] SilenceError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Create an I/O error with operation context.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
