use http::StatusCode;
use lissan_core::HttpError;

/// Errors raised while transcoding audio
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("input is not valid WAV audio: {0}")]
    InvalidInput(String),

    #[error("failed to start ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("I/O error while streaming audio through ffmpeg: {0}")]
    Io(#[from] std::io::Error),

    #[error("ffmpeg exited with code {exit_code:?}: {stderr}")]
    Failed { exit_code: Option<i32>, stderr: String },

    #[error("ffmpeg produced no output")]
    EmptyOutput,
}

impl HttpError for TranscodeError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        "transcode_error"
    }

    fn client_message(&self) -> String {
        "audio transcoding failed".to_string()
    }
}
