//! Prometheus metrics for the verification engine.
//!
//! Naming convention: `blspool_<metric>_<unit>`.

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry.
    pub static ref REGISTRY: Registry = Registry::new();

    /// Chunks whose batch verification failed and were retried per job.
    pub static ref BATCH_RETRIES: Counter = Counter::new(
        "blspool_batch_retries_total",
        "Batch chunks demoted to individual verification"
    ).expect("metric creation failed");

    /// Signature sets admitted through a successful batch call.
    pub static ref BATCH_SIGS_SUCCESS: Counter = Counter::new(
        "blspool_batch_sigs_success_total",
        "Signature sets verified via a successful batch"
    ).expect("metric creation failed");

    /// Job verdicts by outcome.
    pub static ref JOB_RESULTS: CounterVec = CounterVec::new(
        Opts::new("blspool_jobs_total", "Verification jobs by outcome"),
        &["result"]  // result: valid/invalid/error
    ).expect("metric creation failed");

    /// Wall-clock span of one request inside the worker.
    pub static ref REQUEST_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "blspool_request_duration_seconds",
            "Time spent verifying one request"
        ).buckets(exponential_buckets(0.0001, 2.0, 14).unwrap())
    ).expect("metric creation failed");
}

/// Register all engine metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BATCH_RETRIES.clone()),
        Box::new(BATCH_SIGS_SUCCESS.clone()),
        Box::new(JOB_RESULTS.clone()),
        Box::new(REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all registered metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
