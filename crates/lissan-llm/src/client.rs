use async_trait::async_trait;
use lissan_config::LlmConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::{LlmError, Result},
    protocol::{ChatMessage, ChatRequest, ChatResponse},
};

/// Groq's OpenAI-compatible API
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// A single-turn prompt, optionally preceded by a system message
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    pub system: Option<String>,
    pub user: String,
}

impl Prompt {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            system: None,
            user: text.into(),
        }
    }

    /// Attach a system message unless it is blank
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        let system = system.into();
        self.system = (!system.trim().is_empty()).then_some(system);
        self
    }
}

/// Answers a prompt with the text of the model's first reply
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String>;
}

/// OpenAI-compatible chat completion client
pub struct CompletionClient {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
    model: String,
}

impl CompletionClient {
    pub fn new(client: Client, config: &LlmConfig) -> Result<Self> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| LlmError::Config(format!("invalid default URL: {e}")))?,
        };

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Completer for CompletionClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &prompt.user,
        });

        let request = ChatRequest {
            model: &self.model,
            messages,
        };

        tracing::debug!(
            "Completion request: model={}, system={}, input_len={}",
            self.model,
            prompt.system.is_some(),
            prompt.user.len(),
        );

        let mut builder = self.client.post(self.completions_url()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Completion request failed: {e}");
            LlmError::Connection(format!("failed to reach completion API: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Completion API error ({status}): {error_text}");
            return Err(LlmError::ProviderApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse completion response: {e}");
            LlmError::UpstreamFormat(format!("completion response is not valid JSON: {e}"))
        })?;

        let answer = body.into_answer()?;

        tracing::debug!("Completion finished, output_len={}", answer.len());

        Ok(answer)
    }
}
