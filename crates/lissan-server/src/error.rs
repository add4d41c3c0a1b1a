use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use lissan_chain::ChainError;
use lissan_core::{ErrorBody, HttpError};
use thiserror::Error;

use crate::assets::AssetError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is absent or blank
    #[error("{0}")]
    Validation(&'static str),

    /// The body could not be read or parsed
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Chain(e) => e.status_code(),
            Self::Asset(e) => e.status_code(),
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => "invalid_request_error",
            Self::Chain(e) => e.error_type(),
            Self::Asset(e) => e.error_type(),
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Validation(message) => (*message).to_string(),
            Self::BadRequest(message) => message.clone(),
            Self::Chain(e) => e.client_message(),
            Self::Asset(e) => e.client_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error_type = self.error_type(), "request failed: {self}");
        } else {
            tracing::debug!(error_type = self.error_type(), "request rejected: {self}");
        }

        (status, Json(ErrorBody::from_error(&self))).into_response()
    }
}
