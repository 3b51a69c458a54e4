//! # blspool-telemetry
//!
//! Observability for the verification engine: Prometheus metrics plus
//! `tracing`-based structured logging.
//!
//! The engine updates the counters in [`metrics`] per request; the embedding
//! node registers them, serves [`metrics::encode_metrics`] from its own
//! scrape endpoint, and calls [`init_telemetry`] once at startup.

pub mod config;
pub mod metrics;

pub use config::TelemetryConfig;
pub use metrics::{encode_metrics, register_metrics};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Initialize metrics registration and the global tracing subscriber.
///
/// Call once at process startup; a second call fails because the global
/// subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Install a `tracing` subscriber according to the configuration.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        metrics_port = config.metrics_port,
        "telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_rejects_bad_filter() {
        let config = TelemetryConfig {
            log_level: "blspool=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::LoggingInit(_))
        ));
    }
}
