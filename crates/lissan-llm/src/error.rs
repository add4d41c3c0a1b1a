use http::StatusCode;
use lissan_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while asking the completion vendor
#[derive(Debug, Error)]
pub enum LlmError {
    /// Response did not contain `choices[0].message.content`
    #[error("unexpected completion format: {0}")]
    UpstreamFormat(String),

    /// Vendor replied with a non-success status code
    #[error("provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Client is misconfigured
    #[error("configuration error: {0}")]
    Config(String),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_type(&self) -> &str {
        match self {
            Self::UpstreamFormat(_) => "upstream_format_error",
            Self::ProviderApiError { .. } | Self::Connection(_) => "api_error",
            Self::Config(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::UpstreamFormat(_) => "No response from AI".to_string(),
            _ => "Server error".to_string(),
        }
    }
}
