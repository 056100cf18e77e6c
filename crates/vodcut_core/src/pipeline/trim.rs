//! Per-asset trim pipeline: detect -> pair -> select -> cut.

use std::path::{Path, PathBuf};

use super::report::{ItemOutcome, RunReport};
use super::PipelineResult;
use crate::encode::Encoder;
use crate::ledger::CompletionLedger;
use crate::silence::{pair_intervals, select_trim_window, SilenceDetector};

/// Default trim output: `<stem>_trimmed.<ext>` next to the source.
pub fn default_trim_output(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp4".to_string());
    source.with_file_name(format!("{}_trimmed.{}", stem, ext))
}

/// Trims leading/trailing silence from one asset.
pub struct TrimPipeline<'a> {
    pub detector: &'a dyn SilenceDetector,
    pub encoder: &'a dyn Encoder,
    pub ledger: &'a dyn CompletionLedger,
}

impl TrimPipeline<'_> {
    /// Process one source asset into `output` (or the default sibling path).
    pub fn run(
        &self,
        source: &Path,
        output: Option<&Path>,
        report: &mut RunReport,
    ) -> PipelineResult<()> {
        let output = output
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| default_trim_output(source));
        let label = output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| output.display().to_string());

        if self.ledger.already_produced(&output) {
            tracing::info!(
                "Output already exists, keeping prior result: {}",
                output.display()
            );
            report.record(label, ItemOutcome::Skipped("output already exists".to_string()));
            return Ok(());
        }

        let events = self.detector.detect(source)?;
        let intervals = pair_intervals(&events)?;
        let window = select_trim_window(&intervals);

        if window.is_unbounded() {
            tracing::info!(
                "No usable trim window for {}; copying as-is",
                source.display()
            );
        }

        self.encoder.trim(source, window, &output)?;
        report.record(label, ItemOutcome::Done);
        Ok(())
    }
}
