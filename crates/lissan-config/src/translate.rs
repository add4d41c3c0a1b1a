use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::polling::PollingConfig;

/// Vendor language code for Amharic
pub const AMHARIC_LANGUAGE_CODE: u32 = 2;
/// Vendor language code for English
pub const ENGLISH_LANGUAGE_CODE: u32 = 1;

/// Asynchronous translation vendor
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslateConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Vendor base URL, required when the voice endpoints are used
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Language callers write in, and the language answers are returned in
    #[serde(default = "default_source_language")]
    pub source_language: u32,
    /// Language the completion model is prompted in
    #[serde(default = "default_intermediate_language")]
    pub intermediate_language: u32,
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            source_language: default_source_language(),
            intermediate_language: default_intermediate_language(),
            polling: PollingConfig::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_source_language() -> u32 {
    AMHARIC_LANGUAGE_CODE
}

#[allow(clippy::missing_const_for_fn)]
fn default_intermediate_language() -> u32 {
    ENGLISH_LANGUAGE_CODE
}
