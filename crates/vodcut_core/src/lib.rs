//! vodcut core - batch post-processing for recorded video.
//!
//! Splits source videos into per-chapter clips driven by external chapter
//! tables and trims leading/trailing silence from downloaded video. All
//! business logic lives here with zero CLI dependencies; the external tools
//! (ffmpeg, ffprobe, mkvextract, yt-dlp) are collaborators behind narrow
//! wrappers.
//!
//! Processing is single-threaded and sequential: one asset, one segment,
//! one external invocation at a time. Output-file existence is the only
//! cross-run idempotence mechanism; prior output is never overwritten.

pub mod chapters;
pub mod config;
pub mod discovery;
pub mod download;
pub mod encode;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod probe;
pub mod runner;
pub mod silence;
pub mod tools;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
