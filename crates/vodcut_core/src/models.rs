//! Shared data types for the per-chapter and per-asset pipelines.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One chapter row from an external chapter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Row id, unique within a table.
    pub id: u32,
    /// Chapter start time in seconds.
    pub start_secs: f64,
    /// Chapter end time in seconds.
    pub end_secs: f64,
    /// Free-form title; may contain characters invalid in file names.
    pub title: String,
}

impl ChapterRecord {
    /// Segment length in seconds. Not guaranteed positive; the planner
    /// rejects records where this is zero or negative.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Kind of silence boundary reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilenceEventKind {
    /// Audio dropped below the silence threshold.
    Start,
    /// Audio rose back above the silence threshold.
    End,
}

/// A single silence boundary with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceEvent {
    pub kind: SilenceEventKind,
    pub at_secs: f64,
}

impl SilenceEvent {
    pub fn start(at_secs: f64) -> Self {
        Self {
            kind: SilenceEventKind::Start,
            at_secs,
        }
    }

    pub fn end(at_secs: f64) -> Self {
        Self {
            kind: SilenceEventKind::End,
            at_secs,
        }
    }
}

/// A detected span of near-silence audio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    pub start_secs: f64,
    pub end_secs: f64,
}

/// The portion of a source asset to keep after trimming.
///
/// An absent bound means "from/to the natural edge of the asset".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrimWindow {
    pub start_secs: Option<f64>,
    pub end_secs: Option<f64>,
}

impl TrimWindow {
    /// Window that keeps the entire asset.
    pub fn keep_all() -> Self {
        Self::default()
    }

    /// True when neither edge is trimmed.
    pub fn is_unbounded(&self) -> bool {
        self.start_secs.is_none() && self.end_secs.is_none()
    }
}

/// A planned unit of work producing one output clip from one chapter.
///
/// Created by the segment planner and consumed exactly once by the encode
/// step; never persisted beyond the run.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTask {
    /// Source asset the clip is cut from.
    pub source: PathBuf,
    /// Clip start offset in seconds.
    pub start_secs: f64,
    /// Clip length in seconds (always positive).
    pub duration_secs: f64,
    /// Destination file for the finished clip.
    pub output: PathBuf,
    /// True when the output already exists and must not be re-produced.
    pub skip: bool,
}

/// Format seconds for external tool arguments (millisecond precision).
pub fn format_secs(secs: f64) -> String {
    format!("{:.3}", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_duration() {
        let record = ChapterRecord {
            id: 1,
            start_secs: 10.5,
            end_secs: 42.0,
            title: "Intro".to_string(),
        };
        assert!((record.duration_secs() - 31.5).abs() < 1e-9);
    }

    #[test]
    fn unbounded_window() {
        assert!(TrimWindow::keep_all().is_unbounded());
        assert!(!TrimWindow {
            start_secs: Some(1.0),
            end_secs: None,
        }
        .is_unbounded());
    }

    #[test]
    fn seconds_formatting() {
        assert_eq!(format_secs(0.0), "0.000");
        assert_eq!(format_secs(12.3456), "12.346");
    }
}
