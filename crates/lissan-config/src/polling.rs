use std::time::Duration;

use serde::Deserialize;

/// How a vendor job is polled until it reaches a terminal status
///
/// The first status query is sent immediately, then one every `interval_ms`.
/// Polling gives up after `max_attempts` queries or `timeout_secs` of wall
/// time, whichever comes first.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PollingConfig {
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_interval_ms() -> u64 {
    1_000
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_attempts() -> u32 {
    120
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    180
}
