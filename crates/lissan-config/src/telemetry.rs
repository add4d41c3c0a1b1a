use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// Telemetry configuration
///
/// Logging to stdout is always on. Traces and metrics are only exported
/// when an OTLP `exporter` is configured.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Additional resource attributes
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    /// Emit logs as JSON lines instead of the human-readable format
    #[serde(default)]
    pub json_logs: bool,
    /// OTLP exporter shared by traces and metrics
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
    /// Trace sampling rate (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            resource_attributes: HashMap::new(),
            json_logs: false,
            exporter: None,
            sampling_rate: default_sampling_rate(),
        }
    }
}

/// OTLP exporter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub endpoint: Url,
    #[serde(default)]
    pub protocol: ExportProtocol,
    /// Metrics export interval in seconds
    #[serde(default = "default_export_interval")]
    pub export_interval_secs: u64,
}

/// OTLP export protocol
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProtocol {
    #[default]
    Grpc,
    HttpProto,
}

fn default_service_name() -> String {
    "lissan".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_export_interval() -> u64 {
    30
}
