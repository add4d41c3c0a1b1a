//! Wire types for the `/chat/completions` endpoint

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice's message
    pub fn into_answer(self) -> Result<String, LlmError> {
        let first = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::UpstreamFormat("response has no choices".to_string()))?;

        first
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| LlmError::UpstreamFormat("first choice has no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_first_choice_content() {
        let response = parse(serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Selam"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }));
        assert_eq!(response.into_answer().unwrap(), "Selam");
    }

    #[test]
    fn missing_choices_is_a_format_error() {
        let response = parse(serde_json::json!({"error": {"message": "rate limited"}}));
        assert!(matches!(response.into_answer(), Err(LlmError::UpstreamFormat(_))));
    }

    #[test]
    fn null_content_is_a_format_error() {
        let response = parse(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }));
        assert!(matches!(response.into_answer(), Err(LlmError::UpstreamFormat(_))));
    }

    #[test]
    fn request_serializes_single_turn() {
        let request = ChatRequest {
            model: "llama-3.1-8b-instant",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }
}
