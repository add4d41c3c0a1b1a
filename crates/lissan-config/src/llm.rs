use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Chat completion vendor (any OpenAI-compatible API)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override, defaults to Groq's OpenAI-compatible endpoint
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model used for every completion
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}
