use http::StatusCode;
use lissan_audio::TranscodeError;
use lissan_core::HttpError;
use lissan_jobs::JobError;
use lissan_llm::LlmError;
use thiserror::Error;

use crate::orchestrator::Stage;

pub type Result<T> = std::result::Result<T, ChainError>;

/// First failure observed in a chain, tagged with the stage that raised it
#[derive(Debug, Error)]
pub enum ChainError {
    /// A translation or speech job failed
    #[error("{stage} stage failed: {source}")]
    Job {
        stage: Stage,
        #[source]
        source: JobError,
    },

    #[error("{stage} stage failed: {source}")]
    Completion {
        stage: Stage,
        #[source]
        source: LlmError,
    },

    #[error("{stage} stage failed: {source}")]
    Transcode {
        stage: Stage,
        #[source]
        source: TranscodeError,
    },

    /// Server shutdown interrupted the chain
    #[error("chain cancelled during {stage} stage")]
    Cancelled { stage: Stage },
}

impl ChainError {
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Job { stage, .. }
            | Self::Completion { stage, .. }
            | Self::Transcode { stage, .. }
            | Self::Cancelled { stage } => *stage,
        }
    }

    fn inner(&self) -> Option<&dyn HttpError> {
        match self {
            Self::Job { source, .. } => Some(source),
            Self::Completion { source, .. } => Some(source),
            Self::Transcode { source, .. } => Some(source),
            Self::Cancelled { .. } => None,
        }
    }
}

impl HttpError for ChainError {
    fn status_code(&self) -> StatusCode {
        self.inner().map_or(StatusCode::SERVICE_UNAVAILABLE, |inner| inner.status_code())
    }

    fn error_type(&self) -> &str {
        self.inner().map_or("cancelled", |inner| inner.error_type())
    }

    fn client_message(&self) -> String {
        match self.inner() {
            Some(inner) => inner.client_message(),
            None => "server is shutting down".to_string(),
        }
    }
}
