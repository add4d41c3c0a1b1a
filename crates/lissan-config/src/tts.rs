use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::{polling::PollingConfig, translate::AMHARIC_LANGUAGE_CODE};

/// Asynchronous text-to-speech vendor
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Vendor base URL, required when the voice endpoints are used
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Voice identifier passed to the vendor
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    /// Language code of the synthesized speech
    #[serde(default = "default_language")]
    pub language: u32,
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            voice_id: default_voice_id(),
            language: default_language(),
            polling: PollingConfig::default(),
        }
    }
}

fn default_voice_id() -> String {
    "amharic-female-1".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_language() -> u32 {
    AMHARIC_LANGUAGE_CODE
}
