#![allow(clippy::must_use_candidate)]

pub mod assets;
pub mod cors;
mod env;
pub mod intro;
pub mod llm;
mod loader;
pub mod polling;
pub mod server;
pub mod telemetry;
pub mod transcode;
pub mod translate;
pub mod tts;

use serde::Deserialize;

pub use assets::*;
pub use cors::*;
pub use intro::*;
pub use llm::*;
pub use loader::is_bare_file_name;
pub use polling::*;
pub use server::*;
pub use telemetry::TelemetryConfig;
pub use transcode::*;
pub use translate::*;
pub use tts::*;

/// Top-level Lissan configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Chat completion vendor
    #[serde(default)]
    pub llm: LlmConfig,
    /// Asynchronous translation vendor
    #[serde(default)]
    pub translate: TranslateConfig,
    /// Asynchronous text-to-speech vendor
    #[serde(default)]
    pub tts: TtsConfig,
    /// WAV to MP3 transcoding
    #[serde(default)]
    pub transcode: TranscodeConfig,
    /// Replaceable audio assets
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Introduction text store
    #[serde(default)]
    pub intro: IntroConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
