//! Encode dispatch: the external encoder contract and its ffmpeg
//! implementation.

mod dispatcher;
mod options;

pub use dispatcher::{EncodeError, EncodeResult, Encoder, FfmpegEncoder};
pub use options::{remux_args, segment_args, transcode_args, trim_args};
