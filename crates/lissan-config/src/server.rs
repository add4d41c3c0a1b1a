use std::net::SocketAddr;

use serde::Deserialize;

use crate::cors::CorsConfig;

/// Listener and HTTP surface settings
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Defaults to `0.0.0.0:3000` when unset
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Liveness route, answering `ok` when enabled
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_section_fills_missing_fields() {
        let server: ServerConfig = toml::from_str("[health]\nenabled = false\n").unwrap();

        assert!(!server.health.enabled);
        assert_eq!(server.health.path, "/health");
        assert!(server.listen_address.is_none());
    }
}
