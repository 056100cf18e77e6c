//! Media discovery from CLI path arguments.
//!
//! Arguments may be files or directories; directories are walked recursively
//! and filtered by the recognized container-extension set. Results are sorted
//! so runs are deterministic regardless of directory iteration order.

use std::fs;
use std::path::{Path, PathBuf};

/// Container extensions treated as processable video.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "ts",
];

/// True when the path has a recognized video extension (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Expand files/directories into a sorted list of recognized media files.
///
/// Nonexistent paths are reported and skipped; they do not fail the run.
pub fn find_media_files(paths: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_video_file(path) {
                found.push(path.clone());
            } else {
                tracing::warn!("Not a recognized video file, skipping: {}", path.display());
            }
        } else if path.is_dir() {
            walk(path, &mut found)?;
        } else {
            tracing::warn!("Path not found, skipping: {}", path.display());
        }
    }

    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if is_video_file(&path) {
            found.push(path);
        }
    }
    Ok(())
}
