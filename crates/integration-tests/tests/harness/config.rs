//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use lissan_config::{
    AssetsConfig, Config, HealthConfig, IntroConfig, LlmConfig, PollingConfig, ServerConfig, TranscodeConfig,
    TranslateConfig, TtsConfig,
};
use secrecy::SecretString;
use url::Url;

use super::mock_vendor::MockVendor;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

/// Fast polling so scripted jobs finish in milliseconds
fn fast_polling() -> PollingConfig {
    PollingConfig {
        interval_ms: 10,
        max_attempts: 20,
        timeout_secs: 10,
    }
}

impl ConfigBuilder {
    /// Point every vendor at `mock` and store assets under `assets_dir`
    pub fn new(mock: &MockVendor, assets_dir: &Path) -> Self {
        let jobs_url: Url = mock.jobs_base_url().parse().expect("valid URL");

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                llm: LlmConfig {
                    api_key: Some(SecretString::from("test-key")),
                    base_url: Some(mock.llm_base_url().parse().expect("valid URL")),
                    ..LlmConfig::default()
                },
                translate: TranslateConfig {
                    api_key: Some(SecretString::from("test-key")),
                    base_url: Some(jobs_url.clone()),
                    polling: fast_polling(),
                    ..TranslateConfig::default()
                },
                tts: TtsConfig {
                    api_key: Some(SecretString::from("test-key")),
                    base_url: Some(jobs_url),
                    polling: fast_polling(),
                    ..TtsConfig::default()
                },
                transcode: TranscodeConfig::default(),
                assets: AssetsConfig {
                    directory: assets_dir.to_path_buf(),
                    ..AssetsConfig::default()
                },
                intro: IntroConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Limit how many status polls a translation job gets
    pub fn with_translate_attempts(mut self, max_attempts: u32) -> Self {
        self.config.translate.polling.max_attempts = max_attempts;
        self
    }

    pub fn with_ffmpeg_path(mut self, path: &str) -> Self {
        self.config.transcode.ffmpeg_path = path.to_owned();
        self
    }

    pub fn with_allowed_assets(mut self, names: &[&str]) -> Self {
        self.config.assets.allowed_names = names.iter().map(|n| (*n).to_owned()).collect();
        self
    }

    pub fn with_intro(mut self, text: &str) -> Self {
        self.config.intro.initial_text = text.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Whether an `ffmpeg` binary is available on `PATH`
pub fn ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
