//! Segment planning for the per-chapter pipeline.
//!
//! Turns chapter records into dispatchable segment tasks: computes the time
//! range, assigns the output path, and decides per task whether prior output
//! makes re-production unnecessary. Pure over its inputs apart from the
//! completion ledger.

use std::path::{Path, PathBuf};

use super::sanitize::sanitize_title;
use crate::ledger::CompletionLedger;
use crate::models::{ChapterRecord, SegmentTask};

/// A record the planner refused, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanIssue {
    /// end <= start; the record cannot produce a segment.
    InvalidRange {
        id: u32,
        start_secs: f64,
        end_secs: f64,
    },
}

/// Planner output: dispatchable tasks plus per-record rejects.
#[derive(Debug, Default)]
pub struct SegmentPlan {
    /// One task per accepted record, in table order.
    pub tasks: Vec<SegmentTask>,
    /// Records rejected during planning; reported, never fatal to siblings.
    pub issues: Vec<PlanIssue>,
}

impl SegmentPlan {
    /// Tasks that still need an encoder invocation.
    pub fn pending(&self) -> impl Iterator<Item = &SegmentTask> {
        self.tasks.iter().filter(|task| !task.skip)
    }

    /// Number of tasks satisfied by prior output.
    pub fn skipped(&self) -> usize {
        self.tasks.iter().filter(|task| task.skip).count()
    }
}

/// Output directory for a source's segments: a sibling directory named after
/// the source's base name. One directory per source asset.
pub fn segment_output_dir(source: &Path) -> PathBuf {
    let stem = source.file_stem().map(Path::new).unwrap_or(Path::new(""));
    source.with_file_name(stem)
}

/// Plan one segment task per chapter record, in table order.
pub fn plan_segments(
    source: &Path,
    records: &[ChapterRecord],
    container_ext: &str,
    ledger: &dyn CompletionLedger,
) -> SegmentPlan {
    let out_dir = segment_output_dir(source);
    let mut plan = SegmentPlan::default();

    for record in records {
        let duration_secs = record.duration_secs();
        if duration_secs <= 0.0 {
            tracing::warn!(
                "Chapter {} '{}' has a non-positive range ({} -> {}); skipping",
                record.id,
                record.title,
                record.start_secs,
                record.end_secs
            );
            plan.issues.push(PlanIssue::InvalidRange {
                id: record.id,
                start_secs: record.start_secs,
                end_secs: record.end_secs,
            });
            continue;
        }

        let file_name = format!("{}.{}", sanitize_title(&record.title), container_ext);
        let output = out_dir.join(file_name);
        let skip = ledger.already_produced(&output);
        if skip {
            tracing::info!(
                "Output already exists, keeping prior result: {}",
                output.display()
            );
        }

        plan.tasks.push(SegmentTask {
            source: source.to_path_buf(),
            start_secs: record.start_secs,
            duration_secs,
            output,
            skip,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn record(id: u32, start: f64, end: f64, title: &str) -> ChapterRecord {
        ChapterRecord {
            id,
            start_secs: start,
            end_secs: end,
            title: title.to_string(),
        }
    }

    #[test]
    fn output_dir_is_named_after_the_source() {
        let dir = segment_output_dir(Path::new("/vods/stream_42.mkv"));
        assert_eq!(dir, Path::new("/vods/stream_42"));
    }

    #[test]
    fn one_task_per_record_in_table_order() {
        let records = vec![
            record(1, 0.0, 60.0, "Opening"),
            record(2, 60.0, 300.0, "Main"),
            record(3, 300.0, 360.0, "Ending"),
        ];
        let plan = plan_segments(
            Path::new("/vods/run.mkv"),
            &records,
            "mp4",
            &MemoryLedger::default(),
        );

        assert!(plan.issues.is_empty());
        assert_eq!(plan.tasks.len(), 3);
        assert_eq!(plan.tasks[0].output, Path::new("/vods/run/Opening.mp4"));
        assert_eq!(plan.tasks[1].output, Path::new("/vods/run/Main.mp4"));
        assert!((plan.tasks[1].duration_secs - 240.0).abs() < 1e-9);
        assert!(plan.tasks.iter().all(|task| !task.skip));
    }

    #[test]
    fn invalid_range_rejects_only_that_record() {
        let records = vec![
            record(1, 0.0, 60.0, "Fine"),
            record(2, 120.0, 120.0, "Zero length"),
            record(3, 400.0, 300.0, "Backwards"),
            record(4, 60.0, 120.0, "Also fine"),
        ];
        let plan = plan_segments(
            Path::new("/vods/run.mkv"),
            &records,
            "mp4",
            &MemoryLedger::default(),
        );

        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.issues.len(), 2);
        assert_eq!(
            plan.issues[0],
            PlanIssue::InvalidRange {
                id: 2,
                start_secs: 120.0,
                end_secs: 120.0,
            }
        );
    }

    #[test]
    fn produced_outputs_are_marked_skip() {
        let records = vec![record(1, 0.0, 60.0, "Opening"), record(2, 60.0, 90.0, "Main")];
        let produced = PathBuf::from("/vods/run/Opening.mp4");
        let ledger = MemoryLedger::with(&[&produced]);

        let plan = plan_segments(Path::new("/vods/run.mkv"), &records, "mp4", &ledger);

        assert!(plan.tasks[0].skip);
        assert!(!plan.tasks[1].skip);
        assert_eq!(plan.skipped(), 1);
        assert_eq!(plan.pending().count(), 1);
    }

    #[test]
    fn titles_are_sanitized_into_output_names() {
        let records = vec![record(1, 0.0, 10.0, "Q&A: part 1/2")];
        let plan = plan_segments(
            Path::new("/vods/run.mkv"),
            &records,
            "mp4",
            &MemoryLedger::default(),
        );
        assert_eq!(
            plan.tasks[0].output,
            Path::new("/vods/run/Q&A： part 1／2.mp4")
        );
    }
}
