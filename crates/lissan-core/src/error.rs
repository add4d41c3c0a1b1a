use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Each feature crate implements it for its own error type and the server
/// layer turns the result into a response, so the domain crates never
/// depend on axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `validation_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// JSON body returned for every failed request: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }

    /// Build the body from any [`HttpError`], using its client-safe message
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self::new(error.client_message())
    }
}
