use http::StatusCode;
use lissan_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JobError>;

/// Errors raised while driving a vendor job to completion
#[derive(Debug, Error)]
pub enum JobError {
    /// The vendor did not accept the job or returned no task identifier
    #[error("job submission failed: {0}")]
    Submission(String),

    /// The job reached the terminal `ERROR` status
    #[error("job {task_id} failed")]
    Failed { task_id: String },

    /// The job was still pending when the poll budget ran out
    #[error("job {task_id} did not finish after {attempts} status checks")]
    Timeout { task_id: String, attempts: u32 },

    /// Polling was cancelled because the server is shutting down
    #[error("job polling cancelled")]
    Cancelled,

    /// Vendor replied with a body we could not interpret
    #[error("unexpected response format: {0}")]
    UpstreamFormat(String),

    /// Vendor replied with a non-success status code
    #[error("provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// The vendor client is misconfigured
    #[error("configuration error: {0}")]
    Config(String),
}

impl HttpError for JobError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Submission(_) => "submission_error",
            Self::Failed { .. } => "job_failed_error",
            Self::Timeout { .. } => "job_timeout_error",
            Self::Cancelled => "cancelled",
            Self::UpstreamFormat(_) => "upstream_format_error",
            Self::ProviderApiError { .. } | Self::Connection(_) => "api_error",
            Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::ProviderApiError { status, .. } => format!("upstream service returned status {status}"),
            Self::Connection(_) => "upstream service unavailable".to_string(),
            Self::Config(_) => "service is not configured".to_string(),
            other => other.to_string(),
        }
    }
}
