use axum::{
    Form,
    body::{Body, Bytes},
    extract::{FromRequest, Multipart},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::ApiError;

/// JSON body limit for question and text requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// `{question}` body of `/ask` and `/askEnglish`
#[derive(Debug, Default, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
}

/// `{text}` body of the Amharic and intro endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Return the field unless it is missing or only whitespace
pub fn required(field: Option<String>, message: &'static str) -> Result<String, ApiError> {
    field.filter(|value| !value.trim().is_empty()).ok_or(ApiError::Validation(message))
}

/// Extractor for JSON request bodies
///
/// An empty body reads as `{}` so that a missing field is reported by the
/// handler as a validation error rather than a parse failure.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {e}")))?;

        parse_json(&bytes).map(Self)
    }
}

/// Extractor accepting either a JSON or a URL-encoded form body
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(request, state)
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to parse form body: {}", e.body_text())))?;
            return Ok(Self(value));
        }

        let JsonBody(value) = JsonBody::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}

fn parse_json<T: DeserializeOwned + Default>(bytes: &Bytes) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| ApiError::BadRequest(format!("Failed to parse request body: {e}")))
}

/// Audio upload from a `multipart/form-data` body with `file` and `name` fields
///
/// When `name` is absent the uploaded file's own name is used.
#[derive(Debug)]
pub struct AudioUpload {
    pub name: Option<String>,
    pub contents: Option<Vec<u8>>,
}

impl<S> FromRequest<S> for AudioUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to parse multipart form: {}", e.body_text())))?;

        let mut name = None;
        let mut file_name = None;
        let mut contents = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text())))?
        {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "file" => {
                    file_name = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read uploaded file: {}", e.body_text())))?;
                    contents = Some(bytes.to_vec());
                }
                "name" => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read name field: {}", e.body_text())))?;
                    name = Some(value);
                }
                other => {
                    tracing::debug!("ignoring multipart field '{other}'");
                }
            }
        }

        Ok(Self {
            name: name.filter(|n| !n.trim().is_empty()).or(file_name),
            contents,
        })
    }
}
