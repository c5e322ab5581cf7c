//! Metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, endpoint, status
//! - `http_request_duration_seconds` (histogram): latency by method, endpoint
//! - `payment_processing_duration_seconds` (histogram): simulated payment wait
//!
//! # Design Decisions
//! - Sinks are injected through `AppContext`, never installed globally
//! - The Prometheus recorder is driven through `with_local_recorder`, so
//!   every context owns an isolated registry
//! - Metric updates are atomic; concurrent requests never lose increments

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::http::StatusCode;
use metrics::{counter, describe_counter, describe_histogram, histogram, with_local_recorder, Unit};
use metrics_exporter_prometheus::{
    BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder,
};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
pub const PAYMENT_PROCESSING_DURATION_SECONDS: &str = "payment_processing_duration_seconds";

/// Prometheus client default buckets.
const DEFAULT_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

const PAYMENT_BUCKETS: &[f64] = &[0.1, 0.2, 0.3, 0.5, 1.0, 2.0, 5.0];

/// What the metrics interceptor observed about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub method: String,
    pub path: String,
    pub status: StatusCode,
    pub duration: Duration,
}

/// Destination for request and payment measurements.
///
/// Implementations must tolerate concurrent calls from many requests.
pub trait MetricsSink: Send + Sync {
    /// Count one finished request and observe its latency.
    fn record_request(&self, outcome: &RequestOutcome);

    /// Observe one simulated payment wait.
    fn record_payment_processing(&self, duration: Duration);

    /// Render current values in Prometheus text exposition format.
    fn render(&self) -> String;
}

/// Sink backed by a non-global Prometheus recorder.
pub struct PrometheusSink {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl PrometheusSink {
    pub fn new() -> Result<Self, BuildError> {
        let recorder = PrometheusBuilder::new()
            .set_buckets(DEFAULT_BUCKETS)?
            .set_buckets_for_metric(
                Matcher::Full(PAYMENT_PROCESSING_DURATION_SECONDS.to_string()),
                PAYMENT_BUCKETS,
            )?
            .build_recorder();
        let handle = recorder.handle();

        with_local_recorder(&recorder, || {
            describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
            describe_histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                Unit::Seconds,
                "HTTP request latency in seconds"
            );
            describe_histogram!(
                PAYMENT_PROCESSING_DURATION_SECONDS,
                Unit::Seconds,
                "Payment processing latency in seconds"
            );
        });

        Ok(Self { recorder, handle })
    }
}

impl MetricsSink for PrometheusSink {
    fn record_request(&self, outcome: &RequestOutcome) {
        with_local_recorder(&self.recorder, || {
            counter!(
                HTTP_REQUESTS_TOTAL,
                "method" => outcome.method.clone(),
                "endpoint" => outcome.path.clone(),
                "status" => outcome.status.as_u16().to_string()
            )
            .increment(1);
            histogram!(
                HTTP_REQUEST_DURATION_SECONDS,
                "method" => outcome.method.clone(),
                "endpoint" => outcome.path.clone()
            )
            .record(outcome.duration.as_secs_f64());
        });
    }

    fn record_payment_processing(&self, duration: Duration) {
        with_local_recorder(&self.recorder, || {
            histogram!(PAYMENT_PROCESSING_DURATION_SECONDS).record(duration.as_secs_f64());
        });
    }

    fn render(&self) -> String {
        self.handle.render()
    }
}

/// Sink that keeps every observation in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    requests: Mutex<Vec<RequestOutcome>>,
    payments: Mutex<Vec<Duration>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded request, in recording order.
    pub fn outcomes(&self) -> Vec<RequestOutcome> {
        lock(&self.requests).clone()
    }

    /// Every recorded payment wait, in recording order.
    pub fn payment_durations(&self) -> Vec<Duration> {
        lock(&self.payments).clone()
    }

    /// Value of the request counter for one label set.
    pub fn request_count(&self, method: &str, path: &str, status: StatusCode) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|o| o.method == method && o.path == path && o.status == status)
            .count()
    }
}

impl MetricsSink for MemorySink {
    fn record_request(&self, outcome: &RequestOutcome) {
        lock(&self.requests).push(outcome.clone());
    }

    fn record_payment_processing(&self, duration: Duration) {
        lock(&self.payments).push(duration);
    }

    fn render(&self) -> String {
        let mut counts: BTreeMap<(String, String, u16), usize> = BTreeMap::new();
        for outcome in lock(&self.requests).iter() {
            *counts
                .entry((outcome.method.clone(), outcome.path.clone(), outcome.status.as_u16()))
                .or_default() += 1;
        }

        let mut out = String::new();
        for ((method, path, status), count) in counts {
            writeln!(
                out,
                "{HTTP_REQUESTS_TOTAL}{{method=\"{method}\",endpoint=\"{path}\",status=\"{status}\"}} {count}"
            )
            .expect("writing to a String cannot fail");
        }
        writeln!(
            out,
            "{PAYMENT_PROCESSING_DURATION_SECONDS}_count {}",
            lock(&self.payments).len()
        )
        .expect("writing to a String cannot fail");
        out
    }
}

// Recording may run from a drop guard while unwinding; a poisoned lock must
// not turn that into an abort.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
