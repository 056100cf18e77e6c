//! Embedded Matroska chapter source.
//!
//! Reads chapters straight from the container via `mkvextract <file>
//! chapters -` and converts them into the same `ChapterRecord` stream the
//! CSV table yields. Chapter end times come from the next chapter's start;
//! the final chapter ends at the container duration supplied by the caller.
//!
//! Default-named chapters ("Chapter NN") carry no information and are
//! dropped after end times are assigned.

use std::path::Path;

use super::types::{ChapterError, ChapterResult};
use crate::models::ChapterRecord;
use crate::runner::CommandRunner;

/// Extract embedded chapters from a Matroska source.
///
/// `duration_secs` bounds the final chapter; probe it from the container.
pub fn load_embedded_chapters(
    source: &Path,
    duration_secs: f64,
    runner: &CommandRunner,
) -> ChapterResult<Vec<ChapterRecord>> {
    if !source.is_file() {
        return Err(ChapterError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            source.display().to_string(),
        )));
    }

    let output = runner.run(
        "mkvextract",
        &[
            source.as_os_str(),
            std::ffi::OsStr::new("chapters"),
            std::ffi::OsStr::new("-"),
        ],
    )?;

    if !output.success {
        return Err(ChapterError::ExtractionFailed(format!(
            "mkvextract exited with code {}: {}",
            output.exit_code,
            output.stderr_tail(4)
        )));
    }

    if output.stdout.trim().is_empty() {
        return Err(ChapterError::NoChapters);
    }

    parse_chapter_xml(&output.stdout, duration_secs)
}

/// Parse Matroska chapter XML into chapter records.
pub fn parse_chapter_xml(xml: &str, duration_secs: f64) -> ChapterResult<Vec<ChapterRecord>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| ChapterError::MalformedXml(format!("XML parse error: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "Chapters" {
        return Err(ChapterError::MalformedXml(
            "root element must be <Chapters>".to_string(),
        ));
    }

    // (start, title) per atom, in document order.
    let mut atoms: Vec<(f64, String)> = Vec::new();
    for atom in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "ChapterAtom")
    {
        let start = atom
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "ChapterTimeStart")
            .and_then(|n| n.text())
            .and_then(|t| parse_timestamp_secs(t.trim()));

        let title = atom
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "ChapterString")
            .and_then(|n| n.text())
            .map(|t| t.to_string());

        if let (Some(start), Some(title)) = (start, title) {
            atoms.push((start, title));
        }
    }

    if atoms.is_empty() {
        return Err(ChapterError::NoChapters);
    }

    atoms.sort_by(|a, b| a.0.total_cmp(&b.0));

    // End times are assigned from the full ordered list before any name
    // filtering, so dropping a default-named chapter never stretches its
    // neighbor.
    let mut records = Vec::new();
    for (index, (start, title)) in atoms.iter().enumerate() {
        let end = atoms
            .get(index + 1)
            .map(|(next_start, _)| *next_start)
            .unwrap_or(duration_secs);

        if is_default_chapter_name(title) {
            continue;
        }

        records.push(ChapterRecord {
            id: index as u32 + 1,
            start_secs: *start,
            end_secs: end,
            title: title.clone(),
        });
    }

    if records.is_empty() {
        return Err(ChapterError::NoChapters);
    }

    Ok(records)
}

/// True for auto-generated names of the form "Chapter NN".
fn is_default_chapter_name(name: &str) -> bool {
    match name.strip_prefix("Chapter ") {
        Some(rest) => rest.len() == 2 && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Parse an HH:MM:SS(.fraction) timestamp into seconds.
fn parse_timestamp_secs(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;

    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0"?>
<Chapters>
  <EditionEntry>
    <ChapterAtom>
      <ChapterTimeStart>00:00:00.000000000</ChapterTimeStart>
      <ChapterDisplay>
        <ChapterString>Chapter 01</ChapterString>
        <ChapterLanguage>jpn</ChapterLanguage>
      </ChapterDisplay>
    </ChapterAtom>
    <ChapterAtom>
      <ChapterTimeStart>00:05:30.500000000</ChapterTimeStart>
      <ChapterDisplay>
        <ChapterString>First boss</ChapterString>
        <ChapterLanguage>jpn</ChapterLanguage>
      </ChapterDisplay>
    </ChapterAtom>
    <ChapterAtom>
      <ChapterTimeStart>00:12:00.000000000</ChapterTimeStart>
      <ChapterDisplay>
        <ChapterString>Ending talk</ChapterString>
      </ChapterDisplay>
    </ChapterAtom>
  </EditionEntry>
</Chapters>"#;

    #[test]
    fn parses_and_assigns_end_times() {
        let records = parse_chapter_xml(SAMPLE_XML, 1000.0).unwrap();
        // "Chapter 01" is default-named and dropped.
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "First boss");
        assert!((records[0].start_secs - 330.5).abs() < 1e-9);
        assert!((records[0].end_secs - 720.0).abs() < 1e-9);

        assert_eq!(records[1].title, "Ending talk");
        assert!((records[1].end_secs - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn default_names_are_recognized() {
        assert!(is_default_chapter_name("Chapter 01"));
        assert!(is_default_chapter_name("Chapter 27"));
        assert!(!is_default_chapter_name("Chapter 1"));
        assert!(!is_default_chapter_name("Chapter 001"));
        assert!(!is_default_chapter_name("Intro"));
    }

    #[test]
    fn timestamps_parse_with_fractions() {
        assert_eq!(parse_timestamp_secs("00:00:00.000000000"), Some(0.0));
        assert_eq!(parse_timestamp_secs("01:01:01"), Some(3661.0));
        assert!((parse_timestamp_secs("00:05:30.500").unwrap() - 330.5).abs() < 1e-9);
        assert_eq!(parse_timestamp_secs("12:34"), None);
    }

    #[test]
    fn all_default_names_means_no_chapters() {
        let xml = r#"<Chapters><EditionEntry>
            <ChapterAtom>
              <ChapterTimeStart>00:00:00</ChapterTimeStart>
              <ChapterDisplay><ChapterString>Chapter 01</ChapterString></ChapterDisplay>
            </ChapterAtom>
        </EditionEntry></Chapters>"#;
        assert!(matches!(
            parse_chapter_xml(xml, 60.0),
            Err(ChapterError::NoChapters)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_chapter_xml("not xml at all", 0.0),
            Err(ChapterError::MalformedXml(_))
        ));
    }
}
