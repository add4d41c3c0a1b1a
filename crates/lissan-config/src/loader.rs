use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, PollingConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_vendors()?;
        validate_polling("translate", &self.translate.polling)?;
        validate_polling("tts", &self.tts.polling)?;
        self.validate_assets()?;
        self.validate_paths()?;
        Ok(())
    }

    fn validate_vendors(&self) -> anyhow::Result<()> {
        for (section, key) in [
            ("llm", &self.llm.api_key),
            ("translate", &self.translate.api_key),
            ("tts", &self.tts.api_key),
        ] {
            if key.as_ref().is_none_or(|secret| secret.expose_secret().trim().is_empty()) {
                anyhow::bail!("{section}.api_key must be set");
            }
        }

        if self.translate.base_url.is_none() {
            anyhow::bail!("translate.base_url must be set");
        }

        if self.tts.base_url.is_none() {
            anyhow::bail!("tts.base_url must be set");
        }

        if self.tts.voice_id.trim().is_empty() {
            anyhow::bail!("tts.voice_id must not be empty");
        }

        if self.translate.source_language == self.translate.intermediate_language {
            tracing::warn!("translate.source_language equals intermediate_language, translations will be no-ops");
        }

        Ok(())
    }

    fn validate_assets(&self) -> anyhow::Result<()> {
        for name in &self.assets.allowed_names {
            if !is_bare_file_name(name) {
                anyhow::bail!("assets.allowed_names entry '{name}' must be a bare file name");
            }
        }

        if self.assets.max_upload_bytes == 0 {
            anyhow::bail!("assets.max_upload_bytes must be greater than 0");
        }

        Ok(())
    }

    fn validate_paths(&self) -> anyhow::Result<()> {
        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        let serve_path = &self.assets.serve_path;
        if !serve_path.starts_with('/') || serve_path == "/" {
            anyhow::bail!("assets.serve_path must start with '/' and not be the root");
        }

        Ok(())
    }
}

fn validate_polling(section: &str, polling: &PollingConfig) -> anyhow::Result<()> {
    if polling.interval_ms == 0 {
        anyhow::bail!("{section}.polling.interval_ms must be greater than 0");
    }

    if polling.max_attempts == 0 {
        anyhow::bail!("{section}.polling.max_attempts must be greater than 0");
    }

    if polling.timeout_secs == 0 {
        anyhow::bail!("{section}.polling.timeout_secs must be greater than 0");
    }

    Ok(())
}

/// A single path component that is not `.` or `..`
pub fn is_bare_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.starts_with('.')
}
