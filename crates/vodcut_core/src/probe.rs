//! Media probing via ffprobe.
//!
//! Two narrow queries: the codec name of a selected stream and the container
//! duration. The codec answer feeds exactly one decision - whether a
//! codec-level remux suffices or a full re-encode is needed.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::runner::CommandRunner;

/// Errors from probing a media file.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The source file does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    /// The source has no video stream to work with.
    #[error("no video stream in {0}")]
    NoVideoStream(PathBuf),

    /// ffprobe exited with a failure.
    #[error("ffprobe failed with exit code {exit_code}: {message}")]
    ProbeFailed { exit_code: i32, message: String },

    /// ffprobe output was not the expected JSON shape.
    #[error("unexpected ffprobe output: {0}")]
    MalformedOutput(String),

    /// JSON-level parse error.
    #[error("failed to parse ffprobe output: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for probe results.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Stream selector for codec queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    fn selector(self) -> &'static str {
        match self {
            StreamKind::Video => "v:0",
            StreamKind::Audio => "a:0",
        }
    }
}

/// Codecs that can be carried into an MP4 container without re-encoding.
const REMUX_VIDEO_CODECS: &[&str] = &["h264", "hevc", "av1"];
const REMUX_AUDIO_CODECS: &[&str] = &["aac", "mp3"];

/// Codec name of the first stream of the given kind, or `None` when the
/// source has no such stream.
pub fn codec_name(
    source: &Path,
    kind: StreamKind,
    runner: &CommandRunner,
) -> ProbeResult<Option<String>> {
    if !source.is_file() {
        return Err(ProbeError::SourceNotFound(source.to_path_buf()));
    }

    let source_arg = source.display().to_string();
    let args = [
        "-v",
        "error",
        "-select_streams",
        kind.selector(),
        "-show_entries",
        "stream=codec_name",
        "-of",
        "json",
        source_arg.as_str(),
    ];
    let output = runner.run("ffprobe", &args)?;
    if !output.success {
        return Err(ProbeError::ProbeFailed {
            exit_code: output.exit_code,
            message: output.stderr_tail(4),
        });
    }

    parse_codec_json(&output.stdout)
}

/// Container duration in seconds.
pub fn duration_secs(source: &Path, runner: &CommandRunner) -> ProbeResult<f64> {
    if !source.is_file() {
        return Err(ProbeError::SourceNotFound(source.to_path_buf()));
    }

    let source_arg = source.display().to_string();
    let args = [
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "json",
        source_arg.as_str(),
    ];
    let output = runner.run("ffprobe", &args)?;
    if !output.success {
        return Err(ProbeError::ProbeFailed {
            exit_code: output.exit_code,
            message: output.stderr_tail(4),
        });
    }

    parse_duration_json(&output.stdout)
}

/// Decide whether codec-level remux suffices or a full re-encode is needed.
///
/// A missing audio stream forces a re-encode, matching the conservative
/// treatment of an unprobeable codec.
pub fn needs_encode(video_codec: &str, audio_codec: Option<&str>) -> bool {
    let video_ok = REMUX_VIDEO_CODECS.contains(&video_codec);
    let audio_ok = audio_codec.is_some_and(|codec| REMUX_AUDIO_CODECS.contains(&codec));
    !(video_ok && audio_ok)
}

fn parse_codec_json(json: &str) -> ProbeResult<Option<String>> {
    let value: Value = serde_json::from_str(json)?;
    let codec = value
        .get("streams")
        .and_then(|streams| streams.as_array())
        .and_then(|streams| streams.first())
        .and_then(|stream| stream.get("codec_name"))
        .and_then(|name| name.as_str())
        .map(|name| name.to_string());
    Ok(codec)
}

fn parse_duration_json(json: &str) -> ProbeResult<f64> {
    let value: Value = serde_json::from_str(json)?;
    value
        .get("format")
        .and_then(|format| format.get("duration"))
        .and_then(|duration| duration.as_str())
        .and_then(|duration| duration.trim().parse::<f64>().ok())
        .ok_or_else(|| ProbeError::MalformedOutput("no format.duration field".to_string()))
}
