use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{StatusCode, header};
use lissan_chain::{Audio, Orchestrator};
use lissan_llm::Prompt;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::{
    assets::{AssetError, AssetStore},
    error::{ApiError, Result},
    intro::IntroStore,
    request::{AudioUpload, JsonBody, JsonOrForm, QuestionRequest, TextRequest, required},
};

const QUESTION_REQUIRED: &str = "Question is required";
const TEXT_REQUIRED: &str = "Text is required";

/// Shared state of every route
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub intro: IntroStore,
    pub assets: AssetStore,
    pub redirect_to: Arc<str>,
    /// Fired on shutdown to abandon in-flight chains
    pub cancel: CancellationToken,
}

pub async fn root() -> &'static str {
    "Server is running!"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn ask(State(state): State<AppState>, JsonBody(body): JsonBody<QuestionRequest>) -> Result<Response> {
    let question = required(body.question, QUESTION_REQUIRED)?;

    let answer = state.orchestrator.complete(&Prompt::user(question), &state.cancel).await?;

    Ok(Json(json!({ "answer": answer })).into_response())
}

/// Like [`ask`], with the stored introduction as the system message
pub async fn ask_english(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<QuestionRequest>,
) -> Result<Response> {
    let question = required(body.question, QUESTION_REQUIRED)?;

    let prompt = Prompt::user(question).with_system(state.intro.get().await);
    let answer = state.orchestrator.complete(&prompt, &state.cancel).await?;

    Ok(Json(json!({ "answer": answer })).into_response())
}

pub async fn ask_amharic(State(state): State<AppState>, JsonBody(body): JsonBody<TextRequest>) -> Result<Response> {
    let text = required(body.text, TEXT_REQUIRED)?;

    let audio = state.orchestrator.answer_audio(&text, &state.cancel).await?;

    Ok(audio_response(audio))
}

pub async fn ask_amharic_text(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TextRequest>,
) -> Result<Response> {
    let text = required(body.text, TEXT_REQUIRED)?;

    let answer = state.orchestrator.answer_text(&text, &state.cancel).await?;

    Ok(Json(json!({ "ans": answer })).into_response())
}

pub async fn generate_audio(State(state): State<AppState>, JsonBody(body): JsonBody<TextRequest>) -> Result<Response> {
    let text = required(body.text, TEXT_REQUIRED)?;

    let audio = state.orchestrator.speak(&text, &state.cancel).await?;

    Ok(audio_response(audio))
}

/// Store the introduction text verbatim, then redirect back to the front-end
pub async fn save_intro(State(state): State<AppState>, JsonOrForm(body): JsonOrForm<TextRequest>) -> Result<Response> {
    let text = body.text.ok_or(ApiError::Validation(TEXT_REQUIRED))?;

    tracing::info!(chars = text.chars().count(), "introduction text updated");
    state.intro.set(text).await;

    Ok(Redirect::to(&state.redirect_to).into_response())
}

pub async fn intro_text(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "text": state.intro.get().await }))
}

pub async fn change_audio(State(state): State<AppState>, upload: AudioUpload) -> Result<Response> {
    let name = upload.name.ok_or(AssetError::MissingName)?;
    let contents = upload.contents.ok_or(AssetError::MissingFile)?;

    state.assets.replace(&name, &contents).await?;

    Ok(Json(json!({ "saved": name })).into_response())
}

fn audio_response(audio: Audio) -> Response {
    ([(header::CONTENT_TYPE, audio.content_type)], audio.bytes).into_response()
}
