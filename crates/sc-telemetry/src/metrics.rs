//! Prometheus metrics for Sigchain.
//!
//! All metrics follow the naming convention: `sc_<metric>_<unit>`
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `sc_devices_created_total` | Counter | `algorithm` |
//! | `sc_signatures_total` | Counter | `algorithm`, `result` |
//! | `sc_sign_duration_seconds` | Histogram | `algorithm` |
//! | `sc_lock_wait_seconds` | Histogram | none |

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::time::Duration;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // DEVICE METRICS
    // =========================================================================

    /// Devices created, by algorithm
    pub static ref DEVICES_CREATED: CounterVec = CounterVec::new(
        Opts::new("sc_devices_created_total", "Total signature devices created"),
        &["algorithm"]
    ).expect("metric creation failed");

    // =========================================================================
    // SIGNING METRICS
    // =========================================================================

    /// Sign attempts, by algorithm and outcome
    pub static ref SIGNATURES: CounterVec = CounterVec::new(
        Opts::new("sc_signatures_total", "Total sign attempts"),
        &["algorithm", "result"]  // result: success/failure/timeout
    ).expect("metric creation failed");

    /// Time spent inside a sign critical section
    pub static ref SIGN_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sc_sign_duration_seconds",
            "Time spent producing a chained signature"
        ).buckets(exponential_buckets(0.0001, 2.0, 16).expect("bucket layout")),
        &["algorithm"]
    ).expect("metric creation failed");

    /// Time callers waited for a device lease
    pub static ref LOCK_WAIT: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "sc_lock_wait_seconds",
            "Time spent waiting for a device lease"
        ).buckets(exponential_buckets(0.00001, 2.0, 18).expect("bucket layout"))
    ).expect("metric creation failed");
}

/// Outcome label for `sc_signatures_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutcome {
    /// Signature produced and persisted
    Success,
    /// Signing or persistence failed
    Failure,
    /// Lease wait timed out or was cancelled
    Timeout,
}

impl SignOutcome {
    fn as_label(self) -> &'static str {
        match self {
            SignOutcome::Success => "success",
            SignOutcome::Failure => "failure",
            SignOutcome::Timeout => "timeout",
        }
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; repeated registration is ignored.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(DEVICES_CREATED.clone()),
        Box::new(SIGNATURES.clone()),
        Box::new(SIGN_DURATION.clone()),
        Box::new(LOCK_WAIT.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Count a newly created device.
pub fn record_device_created(algorithm: &str) {
    DEVICES_CREATED.with_label_values(&[algorithm]).inc();
}

/// Count a sign attempt and, on success, observe its duration.
pub fn record_signature(algorithm: &str, outcome: SignOutcome, elapsed: Duration) {
    SIGNATURES
        .with_label_values(&[algorithm, outcome.as_label()])
        .inc();
    if outcome == SignOutcome::Success {
        SIGN_DURATION
            .with_label_values(&[algorithm])
            .observe(elapsed.as_secs_f64());
    }
}

/// Observe how long a caller waited for a lease.
pub fn record_lock_wait(waited: Duration) {
    LOCK_WAIT.observe(waited.as_secs_f64());
}

/// Encode all metrics in the Prometheus text exposition format.
pub fn gather_text() -> Result<String, TelemetryError> {
    register_metrics()?;

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
