use serde::Deserialize;

/// Settings for converting synthesized WAV audio to MP3
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscodeConfig {
    /// Path or name of the ffmpeg binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
    /// MP3 bitrate passed to `-b:a`
    #[serde(default = "default_bitrate")]
    pub bitrate: String,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            bitrate: default_bitrate(),
        }
    }
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_bitrate() -> String {
    "128k".to_string()
}
