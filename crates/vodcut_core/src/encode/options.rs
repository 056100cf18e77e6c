//! Fixed argument lists for the ffmpeg collaborator.
//!
//! Codec parameters come from `EncodeSettings`; these builders only assemble
//! token lists. Every output gets its metadata stripped and the moov atom
//! fronted.

use std::path::Path;

use crate::config::EncodeSettings;
use crate::models::{format_secs, TrimWindow};

fn base_args() -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-nostdin".to_string(),
        "-y".to_string(),
    ]
}

fn push(args: &mut Vec<String>, tokens: &[&str]) {
    args.extend(tokens.iter().map(|t| t.to_string()));
}

fn encode_args(enc: &EncodeSettings) -> Vec<String> {
    vec![
        "-c:v".to_string(),
        enc.video_codec.clone(),
        "-preset".to_string(),
        enc.preset.clone(),
        "-crf".to_string(),
        enc.crf.to_string(),
        "-c:a".to_string(),
        enc.audio_codec.clone(),
        "-b:a".to_string(),
        enc.audio_bitrate.clone(),
    ]
}

fn output_args(output: &Path) -> Vec<String> {
    vec![
        "-map_metadata".to_string(),
        "-1".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        output.display().to_string(),
    ]
}

/// Arguments for cutting one chapter segment with a re-encode.
pub fn segment_args(
    input: &Path,
    start_secs: f64,
    duration_secs: f64,
    output: &Path,
    enc: &EncodeSettings,
) -> Vec<String> {
    let mut args = base_args();
    push(&mut args, &["-ss", &format_secs(start_secs)]);
    push(&mut args, &["-i", &input.display().to_string()]);
    push(&mut args, &["-t", &format_secs(duration_secs)]);
    args.extend(encode_args(enc));
    args.extend(output_args(output));
    args
}

/// Arguments for trimming an asset to a window with stream copy.
///
/// ffmpeg resets timestamps after an input seek, so when both bounds are
/// present the absolute end becomes a duration relative to the seek point.
pub fn trim_args(input: &Path, window: TrimWindow, output: &Path) -> Vec<String> {
    let mut args = base_args();
    let input_arg = input.display().to_string();

    match (window.start_secs, window.end_secs) {
        (Some(start), Some(end)) => {
            push(&mut args, &["-ss", &format_secs(start)]);
            push(&mut args, &["-i", &input_arg]);
            push(&mut args, &["-t", &format_secs(end - start)]);
        }
        (Some(start), None) => {
            push(&mut args, &["-ss", &format_secs(start)]);
            push(&mut args, &["-i", &input_arg]);
        }
        (None, Some(end)) => {
            push(&mut args, &["-i", &input_arg]);
            push(&mut args, &["-to", &format_secs(end)]);
        }
        (None, None) => {
            push(&mut args, &["-i", &input_arg]);
        }
    }

    push(&mut args, &["-c", "copy"]);
    args.extend(output_args(output));
    args
}

/// Arguments for a container remux with stream copy.
pub fn remux_args(input: &Path, output: &Path) -> Vec<String> {
    let mut args = base_args();
    push(&mut args, &["-i", &input.display().to_string()]);
    push(&mut args, &["-c", "copy"]);
    args.extend(output_args(output));
    args
}

/// Arguments for a full re-encode into the configured codecs.
pub fn transcode_args(input: &Path, output: &Path, enc: &EncodeSettings) -> Vec<String> {
    let mut args = base_args();
    push(&mut args, &["-i", &input.display().to_string()]);
    args.extend(encode_args(enc));
    args.extend(output_args(output));
    args
}
