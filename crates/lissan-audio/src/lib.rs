//! Audio transcoding for synthesized speech
//!
//! The speech vendor returns WAV while callers expect MP3. [`FfmpegTranscoder`]
//! streams the WAV through an `ffmpeg` child process and buffers the whole
//! MP3 output before handing it back.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod ffmpeg;

use async_trait::async_trait;

pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;

/// Content type of every buffer a [`Transcoder`] produces
pub const MPEG_CONTENT_TYPE: &str = "audio/mpeg";

/// Converts a complete source-encoded buffer into the delivery encoding
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the fully buffered output. Never returns a partial buffer.
    async fn transcode(&self, input: &[u8]) -> Result<Vec<u8>, TranscodeError>;
}
