//! Encoder collaborator.
//!
//! The pipelines only need this contract: take a source, an optional time
//! range, and a destination, then either produce a finished file or fail
//! with a non-zero signal. The trait keeps the planning and trim logic
//! testable without spawning processes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::options;
use crate::config::EncodeSettings;
use crate::models::{SegmentTask, TrimWindow};
use crate::runner::CommandRunner;

/// Errors from dispatching an encode.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The external encoder exited with a failure.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The encoder exited cleanly but produced nothing.
    #[error("encoder produced no output: {0}")]
    EmptyOutput(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for encode results.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// External encoder contract consumed by the pipelines.
pub trait Encoder {
    /// Produce one chapter clip from a planned segment task.
    fn encode_segment(&self, task: &SegmentTask) -> EncodeResult<()>;

    /// Copy the window of `input` worth keeping into `output`.
    fn trim(&self, input: &Path, window: TrimWindow, output: &Path) -> EncodeResult<()>;

    /// Rewrap `input` into the target container without re-encoding.
    fn remux(&self, input: &Path, output: &Path) -> EncodeResult<()>;

    /// Fully re-encode `input` into the configured codecs.
    fn transcode(&self, input: &Path, output: &Path) -> EncodeResult<()>;
}

/// ffmpeg-backed encoder.
#[derive(Debug)]
pub struct FfmpegEncoder {
    settings: EncodeSettings,
    runner: CommandRunner,
}

impl FfmpegEncoder {
    pub fn new(settings: EncodeSettings) -> Self {
        Self {
            settings,
            runner: CommandRunner::new(),
        }
    }

    fn dispatch(&self, args: Vec<String>, output: &Path) -> EncodeResult<()> {
        let result = self.runner.run("ffmpeg", &args)?;
        if !result.success {
            return Err(EncodeError::CommandFailed {
                tool: "ffmpeg".to_string(),
                exit_code: result.exit_code,
                message: result.stderr_tail(5),
            });
        }

        // ffmpeg can exit 0 and still write nothing for some inputs.
        let size = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(EncodeError::EmptyOutput(output.to_path_buf()));
        }

        Ok(())
    }
}

impl Encoder for FfmpegEncoder {
    fn encode_segment(&self, task: &SegmentTask) -> EncodeResult<()> {
        tracing::info!(
            "Encoding segment {} ({} +{}s)",
            task.output.display(),
            task.start_secs,
            task.duration_secs
        );
        let args = options::segment_args(
            &task.source,
            task.start_secs,
            task.duration_secs,
            &task.output,
            &self.settings,
        );
        self.dispatch(args, &task.output)
    }

    fn trim(&self, input: &Path, window: TrimWindow, output: &Path) -> EncodeResult<()> {
        tracing::info!(
            "Trimming {} -> {} (window {:?}..{:?})",
            input.display(),
            output.display(),
            window.start_secs,
            window.end_secs
        );
        self.dispatch(options::trim_args(input, window, output), output)
    }

    fn remux(&self, input: &Path, output: &Path) -> EncodeResult<()> {
        tracing::info!("Remuxing {} -> {}", input.display(), output.display());
        self.dispatch(options::remux_args(input, output), output)
    }

    fn transcode(&self, input: &Path, output: &Path) -> EncodeResult<()> {
        tracing::info!("Transcoding {} -> {}", input.display(), output.display());
        self.dispatch(
            options::transcode_args(input, output, &self.settings),
            output,
        )
    }
}
