//! Chapter handling: table loading, embedded extraction, and segment
//! planning.
//!
//! A chapter describes a named time sub-range of a source video. Chapters
//! come either from an external CSV table (`<base>_chapters.csv`) or from
//! the Matroska container itself; both sources produce the same
//! `ChapterRecord` stream consumed by the planner.

mod embedded;
mod planner;
mod sanitize;
mod table;
mod types;

pub use embedded::{load_embedded_chapters, parse_chapter_xml};
pub use planner::{plan_segments, segment_output_dir, PlanIssue, SegmentPlan};
pub use sanitize::sanitize_title;
pub use table::{chapter_table_path, load_chapter_table, load_for_source, LoadedTable};
pub use types::{ChapterError, ChapterResult, MalformedRow};
