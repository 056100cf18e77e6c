//! Settings struct with TOML-based sections.
//!
//! Settings map to TOML tables; every field has a serde default so partial
//! config files keep working across releases.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Silence detection thresholds.
    #[serde(default)]
    pub silence: SilenceSettings,

    /// Encoder configuration handed to the ffmpeg collaborator.
    #[serde(default)]
    pub encode: EncodeSettings,

    /// Download collaborator configuration.
    #[serde(default)]
    pub download: DownloadSettings,
}

/// Path configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Default destination for downloaded video.
    #[serde(default = "default_download_folder")]
    pub download_folder: String,
}

fn default_logs_folder() -> String {
    ".vodcut/logs".to_string()
}

fn default_download_folder() -> String {
    ".".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            download_folder: default_download_folder(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Mirror log lines into a daily-rolled file under `paths.logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: false,
        }
    }
}

/// Silence detection thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SilenceSettings {
    /// Volume below this is silence (dB).
    #[serde(default = "default_noise_db")]
    pub noise_db: f64,

    /// Minimum duration before a quiet span counts as silence (seconds).
    #[serde(default = "default_min_silence_secs")]
    pub min_duration_secs: f64,
}

fn default_noise_db() -> f64 {
    -50.0
}

fn default_min_silence_secs() -> f64 {
    0.5
}

impl Default for SilenceSettings {
    fn default() -> Self {
        Self {
            noise_db: default_noise_db(),
            min_duration_secs: default_min_silence_secs(),
        }
    }
}

/// Encoder configuration. These are pass-through tool parameters, not core
/// logic; the defaults mirror a plain H.264/AAC MP4 target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Output container extension.
    #[serde(default = "default_container")]
    pub container: String,

    /// Video encoder passed to `-c:v`.
    #[serde(default = "default_video_codec")]
    pub video_codec: String,

    /// Encoder preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant rate factor.
    #[serde(default = "default_crf")]
    pub crf: u32,

    /// Audio encoder passed to `-c:a`.
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate passed to `-b:a`.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

fn default_container() -> String {
    "mp4".to_string()
}

fn default_video_codec() -> String {
    "libx264".to_string()
}

fn default_preset() -> String {
    "medium".to_string()
}

fn default_crf() -> u32 {
    23
}

fn default_audio_codec() -> String {
    "aac".to_string()
}

fn default_audio_bitrate() -> String {
    "128k".to_string()
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            container: default_container(),
            video_codec: default_video_codec(),
            preset: default_preset(),
            crf: default_crf(),
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
        }
    }
}

/// Download collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Format expression for yt-dlp.
    #[serde(default = "default_format")]
    pub format: String,

    /// Format sort preference.
    #[serde(default = "default_format_sort")]
    pub format_sort: String,

    /// Optional download archive file; only used when it exists.
    #[serde(default)]
    pub archive_path: Option<PathBuf>,
}

fn default_format() -> String {
    "bv+ba".to_string()
}

fn default_format_sort() -> String {
    "codec:avc:aac,res:1080,fps:60,hdr:sdr".to_string()
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            format_sort: default_format_sort(),
            archive_path: None,
        }
    }
}
