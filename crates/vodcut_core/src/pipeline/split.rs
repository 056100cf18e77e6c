//! Per-chapter split pipeline: chapters -> segment plan -> dispatch.

use std::fs;
use std::path::Path;

use super::report::{ItemOutcome, RunReport};
use super::{PipelineError, PipelineResult};
use crate::chapters::{
    load_embedded_chapters, load_for_source, plan_segments, segment_output_dir, PlanIssue,
};
use crate::config::Settings;
use crate::encode::Encoder;
use crate::ledger::CompletionLedger;
use crate::probe;
use crate::runner::CommandRunner;

/// Where chapter records come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterSource {
    /// The CSV sibling table (`<base>_chapters.csv`).
    Table,
    /// Chapters embedded in the Matroska container.
    Embedded,
}

/// Splits one source into per-chapter clips.
pub struct SplitPipeline<'a> {
    pub encoder: &'a dyn Encoder,
    pub ledger: &'a dyn CompletionLedger,
    pub settings: &'a Settings,
    pub runner: &'a CommandRunner,
}

impl SplitPipeline<'_> {
    /// Process one source asset. Segment-level failures are recorded in the
    /// report; an `Err` means the whole asset could not be processed.
    pub fn run(
        &self,
        source: &Path,
        chapters_from: ChapterSource,
        report: &mut RunReport,
    ) -> PipelineResult<()> {
        let source_name = display_name(source);

        let records = match chapters_from {
            ChapterSource::Table => {
                let table = load_for_source(source)?;
                for reject in &table.malformed {
                    report.record(
                        format!("{} row {}", source_name, reject.row),
                        ItemOutcome::Failed(reject.message.clone()),
                    );
                }
                table.records
            }
            ChapterSource::Embedded => {
                let is_matroska = source
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("mkv"));
                if !is_matroska {
                    report.record(
                        source_name,
                        ItemOutcome::Skipped("not a Matroska container".to_string()),
                    );
                    return Ok(());
                }

                let duration = probe::duration_secs(source, self.runner)?;
                load_embedded_chapters(source, duration, self.runner)?
            }
        };

        let plan = plan_segments(
            source,
            &records,
            &self.settings.encode.container,
            self.ledger,
        );

        for issue in &plan.issues {
            let PlanIssue::InvalidRange {
                id,
                start_secs,
                end_secs,
            } = issue;
            report.record(
                format!("{} chapter {}", source_name, id),
                ItemOutcome::Failed(format!("invalid range {} -> {}", start_secs, end_secs)),
            );
        }

        if plan.tasks.is_empty() {
            tracing::info!("No segments to produce for {}", source.display());
            return Ok(());
        }

        let out_dir = segment_output_dir(source);
        fs::create_dir_all(&out_dir)
            .map_err(|e| PipelineError::io("create segment output directory", e))?;

        for task in &plan.tasks {
            let label = display_name(&task.output);
            if task.skip {
                report.record(label, ItemOutcome::Skipped("output already exists".to_string()));
                continue;
            }

            match self.encoder.encode_segment(task) {
                Ok(()) => report.record(label, ItemOutcome::Done),
                Err(e) => {
                    tracing::error!("Segment {} failed: {}", task.output.display(), e);
                    report.record(label, ItemOutcome::Failed(e.to_string()));
                }
            }
        }

        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::ChapterError;
    use crate::ledger::FsLedger;
    use crate::pipeline::test_doubles::RecordingEncoder;

    fn fixture(table: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("vod.mkv");
        fs::write(&source, b"fake container").unwrap();
        fs::write(dir.path().join("vod_chapters.csv"), table).unwrap();
        (dir, source)
    }

    fn run_split(source: &Path, encoder: &RecordingEncoder, report: &mut RunReport) -> PipelineResult<()> {
        let settings = Settings::default();
        let runner = CommandRunner::new();
        let pipeline = SplitPipeline {
            encoder,
            ledger: &FsLedger,
            settings: &settings,
            runner: &runner,
        };
        pipeline.run(source, ChapterSource::Table, report)
    }

    #[test]
    fn produces_one_clip_per_row() {
        let (_dir, source) = fixture(
            "id,start,end,title\n\
             1,0,60,Opening\n\
             2,60,300,Main part\n",
        );
        let encoder = RecordingEncoder::new();
        let mut report = RunReport::new();

        run_split(&source, &encoder, &mut report).unwrap();

        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].ends_with("vod/Opening.mp4"));
        assert!(calls[1].ends_with("vod/Main part.mp4"));
        assert_eq!(report.completed.len(), 2);
        assert!(report.all_clean());
    }

    #[test]
    fn second_run_dispatches_nothing() {
        let (_dir, source) = fixture("id,start,end,title\n1,0,60,Opening\n2,60,90,End\n");
        let encoder = RecordingEncoder::new();

        let mut first = RunReport::new();
        run_split(&source, &encoder, &mut first).unwrap();
        assert_eq!(encoder.calls.borrow().len(), 2);

        let mut second = RunReport::new();
        run_split(&source, &encoder, &mut second).unwrap();

        // Prior output is authoritative: no second encode for any segment.
        assert_eq!(encoder.calls.borrow().len(), 2);
        assert_eq!(second.skipped.len(), 2);
        assert!(second.completed.is_empty());
    }

    #[test]
    fn invalid_range_skips_row_but_not_siblings() {
        let (_dir, source) = fixture(
            "id,start,end,title\n\
             1,0,60,Fine\n\
             2,90,90,Broken\n\
             3,90,120,Also fine\n",
        );
        let encoder = RecordingEncoder::new();
        let mut report = RunReport::new();

        run_split(&source, &encoder, &mut report).unwrap();

        assert_eq!(encoder.calls.borrow().len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].contains("chapter 2"));
    }

    #[test]
    fn malformed_rows_are_reported_and_siblings_encoded() {
        let (_dir, source) = fixture(
            "id,start,end,title\n\
             1,zero,60,Broken\n\
             2,60,120,Fine\n",
        );
        let encoder = RecordingEncoder::new();
        let mut report = RunReport::new();

        run_split(&source, &encoder, &mut report).unwrap();

        assert_eq!(encoder.calls.borrow().len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].contains("row 1"));
    }

    #[test]
    fn missing_table_aborts_the_asset() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("vod.mkv");
        fs::write(&source, b"fake").unwrap();

        let encoder = RecordingEncoder::new();
        let mut report = RunReport::new();
        let err = run_split(&source, &encoder, &mut report).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Chapters(ChapterError::TableNotFound(_))
        ));
        assert!(encoder.calls.borrow().is_empty());
    }

    #[test]
    fn encoder_failure_does_not_stop_siblings() {
        let (_dir, source) = fixture(
            "id,start,end,title\n\
             1,0,60,First\n\
             2,60,120,Second\n",
        );
        let encoder = RecordingEncoder::failing_on("First.mp4");
        let mut report = RunReport::new();

        run_split(&source, &encoder, &mut report).unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.completed.len(), 1);
    }

    #[test]
    fn embedded_mode_skips_non_matroska() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("clip.mp4");
        fs::write(&source, b"fake").unwrap();

        let encoder = RecordingEncoder::new();
        let settings = Settings::default();
        let runner = CommandRunner::new();
        let pipeline = SplitPipeline {
            encoder: &encoder,
            ledger: &FsLedger,
            settings: &settings,
            runner: &runner,
        };

        let mut report = RunReport::new();
        pipeline
            .run(&source, ChapterSource::Embedded, &mut report)
            .unwrap();

        assert!(encoder.calls.borrow().is_empty());
        assert_eq!(report.skipped.len(), 1);
    }
}
