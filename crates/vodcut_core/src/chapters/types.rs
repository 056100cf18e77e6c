//! Chapter error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading chapter descriptions.
#[derive(Debug, Error)]
pub enum ChapterError {
    /// The chapter table for a source does not exist.
    #[error("chapter table not found: {0}")]
    TableNotFound(PathBuf),

    /// The chapter table exists but has zero data rows.
    #[error("chapter table has no data rows: {0}")]
    EmptyTable(PathBuf),

    /// The chapter table header is missing a required column.
    #[error("chapter table header must contain id,start,end,title: {0}")]
    MalformedHeader(PathBuf),

    /// Chapter extraction from the container failed.
    #[error("chapter extraction failed: {0}")]
    ExtractionFailed(String),

    /// The extracted chapter XML could not be parsed.
    #[error("malformed chapter XML: {0}")]
    MalformedXml(String),

    /// The container carries no chapters.
    #[error("no chapters found in source")]
    NoChapters,

    /// CSV-level read error.
    #[error("failed to read chapter table: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for chapter operation results.
pub type ChapterResult<T> = Result<T, ChapterError>;

/// A data row the loader rejected, with the reason.
///
/// Malformed rows never abort the table: siblings are still returned and the
/// rejects are surfaced to the caller for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRow {
    /// 1-based data row number.
    pub row: u64,
    pub message: String,
}
