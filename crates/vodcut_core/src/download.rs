//! Download collaborator (yt-dlp).
//!
//! Thin wrapper: assemble the yt-dlp invocation, recover the final file path
//! from `--print after_move:filepath`, and hand it back. No retries; a
//! failure is surfaced once and the unit abandoned.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::DownloadSettings;
use crate::runner::CommandRunner;

/// Output template embedding title, resolution, fps, codec, and id.
const OUTPUT_TEMPLATE: &str = "%(title)s_%(height)s_%(fps)s_%(vcodec.:4)s_(%(id)s).%(ext)s";

/// Errors from the download collaborator.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp exited with a failure.
    #[error("yt-dlp failed with exit code {exit_code}: {message}")]
    ToolFailed { exit_code: i32, message: String },

    /// yt-dlp succeeded but reported no usable output file.
    #[error("yt-dlp reported no output file")]
    NoOutputFile,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download one video into `dest_dir` and return the downloaded file's path.
pub fn fetch_video(
    url: &str,
    dest_dir: &Path,
    settings: &DownloadSettings,
    runner: &CommandRunner,
) -> Result<PathBuf, DownloadError> {
    let template = dest_dir.join(OUTPUT_TEMPLATE);

    let mut args = vec![
        "--format".to_string(),
        settings.format.clone(),
        "--format-sort".to_string(),
        settings.format_sort.clone(),
        "--output".to_string(),
        template.display().to_string(),
        // --print alone implies simulation; we want the real download.
        "--no-simulate".to_string(),
        "--print".to_string(),
        "after_move:filepath".to_string(),
    ];

    if let Some(archive) = &settings.archive_path {
        if archive.exists() {
            args.push("--download-archive".to_string());
            args.push(archive.display().to_string());
        }
    }

    args.push(url.to_string());

    tracing::info!("Downloading {}", url);
    let output = runner.run("yt-dlp", &args)?;
    if !output.success {
        return Err(DownloadError::ToolFailed {
            exit_code: output.exit_code,
            message: output.stderr_tail(5),
        });
    }

    let path = output
        .stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
        .ok_or(DownloadError::NoOutputFile)?;

    if !path.is_file() {
        return Err(DownloadError::NoOutputFile);
    }

    tracing::info!("Downloaded {}", path.display());
    Ok(path)
}
