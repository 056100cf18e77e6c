//! Chapter table loading.
//!
//! A chapter table is a CSV sibling of its source video, named
//! `<video-base-name>_chapters.csv` with header `id,start,end,title`.
//! `start`/`end` are seconds as decimals, `title` is free text (quoted when
//! it contains commas). Row order is preserved; it need not be chronological.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use super::types::{ChapterError, ChapterResult, MalformedRow};
use crate::models::ChapterRecord;

/// Path of the chapter table associated with a source video.
pub fn chapter_table_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    source.with_file_name(format!("{}_chapters.csv", stem))
}

/// A loaded chapter table: parsed rows plus per-row rejects.
#[derive(Debug)]
pub struct LoadedTable {
    /// Well-formed records, in file order.
    pub records: Vec<ChapterRecord>,
    /// Rows that failed to parse; reported, never fatal to siblings.
    pub malformed: Vec<MalformedRow>,
}

/// Load the chapter table at `path`.
///
/// Missing file and zero-data-row tables are hard errors; a malformed row
/// only rejects that row.
pub fn load_chapter_table(path: &Path) -> ChapterResult<LoadedTable> {
    if !path.is_file() {
        return Err(ChapterError::TableNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let (id_col, start_col, end_col, title_col) =
        match (column("id"), column("start"), column("end"), column("title")) {
            (Some(id), Some(start), Some(end), Some(title)) => (id, start, end, title),
            _ => return Err(ChapterError::MalformedHeader(path.to_path_buf())),
        };

    let mut records = Vec::new();
    let mut malformed = Vec::new();
    let mut rows_seen = 0u64;

    for (index, result) in reader.records().enumerate() {
        let row = index as u64 + 1;
        rows_seen += 1;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                malformed.push(MalformedRow {
                    row,
                    message: e.to_string(),
                });
                continue;
            }
        };

        match parse_row(&record, id_col, start_col, end_col, title_col) {
            Ok(parsed) => records.push(parsed),
            Err(message) => malformed.push(MalformedRow { row, message }),
        }
    }

    if rows_seen == 0 {
        return Err(ChapterError::EmptyTable(path.to_path_buf()));
    }

    for reject in &malformed {
        tracing::warn!(
            "{}: row {} rejected: {}",
            path.display(),
            reject.row,
            reject.message
        );
    }

    Ok(LoadedTable { records, malformed })
}

/// Load the chapter table associated with a source video.
pub fn load_for_source(source: &Path) -> ChapterResult<LoadedTable> {
    load_chapter_table(&chapter_table_path(source))
}

fn parse_row(
    record: &csv::StringRecord,
    id_col: usize,
    start_col: usize,
    end_col: usize,
    title_col: usize,
) -> Result<ChapterRecord, String> {
    let field = |col: usize, name: &str| {
        record
            .get(col)
            .map(str::trim)
            .ok_or_else(|| format!("missing field '{}'", name))
    };

    let id_text = field(id_col, "id")?;
    let id = id_text
        .parse::<u32>()
        .map_err(|e| format!("id '{}': {}", id_text, e))?;

    let start_text = field(start_col, "start")?;
    let start_secs = start_text
        .parse::<f64>()
        .map_err(|e| format!("start '{}': {}", start_text, e))?;

    let end_text = field(end_col, "end")?;
    let end_secs = end_text
        .parse::<f64>()
        .map_err(|e| format!("end '{}': {}", end_text, e))?;

    let title = field(title_col, "title")?.to_string();

    Ok(ChapterRecord {
        id,
        start_secs,
        end_secs,
        title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_table(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vod_chapters.csv");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn table_path_uses_stem_convention() {
        let path = chapter_table_path(Path::new("/videos/stream 2024.mkv"));
        assert_eq!(path, Path::new("/videos/stream 2024_chapters.csv"));
    }

    #[test]
    fn missing_table_is_reported() {
        let result = load_chapter_table(Path::new("/nonexistent/vod_chapters.csv"));
        assert!(matches!(result, Err(ChapterError::TableNotFound(_))));
    }

    #[test]
    fn header_only_table_is_empty() {
        let (_dir, path) = write_table("id,start,end,title\n");
        let result = load_chapter_table(&path);
        assert!(matches!(result, Err(ChapterError::EmptyTable(_))));
    }

    #[test]
    fn rows_are_parsed_in_file_order() {
        let (_dir, path) = write_table(
            "id,start,end,title\n\
             1,0,120.5,Opening\n\
             3,300,360,\"Boss, phase two\"\n\
             2,120.5,300,Middle\n",
        );
        let table = load_chapter_table(&path).unwrap();
        assert!(table.malformed.is_empty());
        assert_eq!(table.records.len(), 3);
        // File order, not chronological and not by id.
        assert_eq!(table.records[0].id, 1);
        assert_eq!(table.records[1].id, 3);
        assert_eq!(table.records[1].title, "Boss, phase two");
        assert_eq!(table.records[2].id, 2);
        assert!((table.records[1].start_secs - 300.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_number_rejects_only_that_row() {
        let (_dir, path) = write_table(
            "id,start,end,title\n\
             1,0,60,Fine\n\
             2,not-a-number,120,Broken\n\
             3,120,180,Also fine\n",
        );
        let table = load_chapter_table(&path).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.malformed.len(), 1);
        assert_eq!(table.malformed[0].row, 2);
        assert!(table.malformed[0].message.contains("not-a-number"));
    }

    #[test]
    fn unknown_header_is_rejected() {
        let (_dir, path) = write_table("chapter,begin,finish,name\n1,0,1,x\n");
        let result = load_chapter_table(&path);
        assert!(matches!(result, Err(ChapterError::MalformedHeader(_))));
    }
}
