use std::{io::Cursor, process::Stdio};

use async_trait::async_trait;
use lissan_config::TranscodeConfig;
use tokio::io::AsyncWriteExt;

use crate::{Transcoder, error::TranscodeError};

/// WAV to MP3 transcoder backed by an `ffmpeg` child process
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
    bitrate: String,
}

impl FfmpegTranscoder {
    pub fn new(config: &TranscodeConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            bitrate: config.bitrate.clone(),
        }
    }
}

/// Reject buffers that are not a RIFF/WAVE container
///
/// Only the container magic is enforced. Headers `hound` cannot read, such as
/// streamed WAV with a placeholder data length or G.711 encodings, are left
/// for `ffmpeg` to decode.
fn validate_wav(input: &[u8]) -> Result<(), TranscodeError> {
    if input.len() < 12 || &input[..4] != b"RIFF" || &input[8..12] != b"WAVE" {
        return Err(TranscodeError::InvalidInput("missing RIFF/WAVE header".to_string()));
    }

    match hound::WavReader::new(Cursor::new(input)) {
        Ok(reader) => {
            let spec = reader.spec();
            tracing::trace!(
                channels = spec.channels,
                sample_rate = spec.sample_rate,
                bits = spec.bits_per_sample,
                "transcoding WAV input"
            );
        }
        Err(e) => tracing::debug!("WAV header not parsed ahead of ffmpeg: {e}"),
    }

    Ok(())
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        validate_wav(input)?;

        let mut child = tokio::process::Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-loglevel", "error", "-f", "wav", "-i", "pipe:0"])
            .args(["-vn", "-b:a", &self.bitrate, "-f", "mp3", "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(TranscodeError::Spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TranscodeError::Io(std::io::Error::other("ffmpeg stdin was not captured")))?;

        // Feed stdin while stdout is drained, otherwise a full pipe deadlocks both sides
        let feed = async move {
            let written = stdin.write_all(input).await;
            drop(stdin);
            written
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!("ffmpeg failed ({:?}): {stderr}", output.status.code());
            return Err(TranscodeError::Failed {
                exit_code: output.status.code(),
                stderr,
            });
        }

        // ffmpeg succeeded, so a broken pipe here means it stopped reading early
        fed?;

        if output.stdout.is_empty() {
            return Err(TranscodeError::EmptyOutput);
        }

        tracing::debug!("Transcoded {} bytes of WAV into {} bytes of MP3", input.len(), output.stdout.len());

        Ok(output.stdout)
    }
}
