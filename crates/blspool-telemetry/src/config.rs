//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for metrics and logging.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to logs.
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// Whether to emit JSON formatted logs.
    pub json_logs: bool,

    /// Port a scrape endpoint would serve `/metrics` on. The engine does not
    /// open the socket itself; the embedding node does.
    pub metrics_port: u16,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "blspool".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            metrics_port: 9100,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLSPOOL_SERVICE_NAME`: service name (default: blspool)
    /// - `BLSPOOL_LOG_LEVEL` or `RUST_LOG`: log level (default: info)
    /// - `BLSPOOL_JSON_LOGS`: emit JSON logs (default: false)
    /// - `BLSPOOL_METRICS_PORT`: metrics port (default: 9100)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("BLSPOOL_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: env::var("BLSPOOL_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            json_logs: env::var("BLSPOOL_JSON_LOGS")
                .map(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.json_logs),
            metrics_port: env::var("BLSPOOL_METRICS_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.metrics_port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "blspool");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert_eq!(config.metrics_port, 9100);
    }
}
