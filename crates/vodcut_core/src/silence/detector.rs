//! Silence detection collaborator.
//!
//! Production detection runs ffmpeg's `silencedetect` audio filter over the
//! source and scrapes its diagnostic output into typed events. The trait
//! exists so the trim pipeline can be exercised with synthetic boundary
//! sequences.

use std::path::Path;

use super::parser::parse_silence_events;
use super::types::{SilenceError, SilenceResult};
use crate::config::SilenceSettings;
use crate::models::SilenceEvent;
use crate::runner::CommandRunner;

/// Produces silence boundary events for a source media stream.
pub trait SilenceDetector {
    fn detect(&self, input: &Path) -> SilenceResult<Vec<SilenceEvent>>;
}

/// ffmpeg `silencedetect` implementation.
#[derive(Debug)]
pub struct FfmpegSilenceDetector {
    settings: SilenceSettings,
    runner: CommandRunner,
}

impl FfmpegSilenceDetector {
    pub fn new(settings: SilenceSettings) -> Self {
        Self {
            settings,
            runner: CommandRunner::new(),
        }
    }

    fn filter_spec(&self) -> String {
        format!(
            "silencedetect=noise={}dB:d={}",
            self.settings.noise_db, self.settings.min_duration_secs
        )
    }
}

impl SilenceDetector for FfmpegSilenceDetector {
    fn detect(&self, input: &Path) -> SilenceResult<Vec<SilenceEvent>> {
        let filter = self.filter_spec();
        let args = [
            "-hide_banner".to_string(),
            "-nostdin".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-vn".to_string(),
            "-af".to_string(),
            filter,
            "-f".to_string(),
            "null".to_string(),
            "-".to_string(),
        ];

        let output = self.runner.run("ffmpeg", &args)?;
        if !output.success {
            return Err(SilenceError::DetectorFailed {
                exit_code: output.exit_code,
                message: output.stderr_tail(4),
            });
        }

        // silencedetect reports on stderr alongside the progress noise.
        let events = parse_silence_events(&output.stderr);
        tracing::debug!(
            "Detected {} silence boundaries in {}",
            events.len(),
            input.display()
        );
        Ok(events)
    }
}
