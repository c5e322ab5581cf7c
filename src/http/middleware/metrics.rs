//! Request metrics interceptor.
//!
//! Times every request and records one counter increment and one latency
//! observation once the wrapped chain is done, whatever status it produced.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use futures_util::future::BoxFuture;

use crate::http::capture::StatusCapture;
use crate::http::pipeline::Interceptor;
use crate::observability::{MetricsSink, RequestOutcome};

/// Status recorded when the wrapped chain ends without producing a response.
pub const ABORTED_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

pub struct RecordMetrics {
    sink: Arc<dyn MetricsSink>,
}

impl RecordMetrics {
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self { sink }
    }
}

impl Interceptor for RecordMetrics {
    fn handle<'a>(&'a self, request: Request, next: Next) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let mut in_flight = InFlight::start(self.sink.as_ref(), &request);
            let response = next.run(request).await;
            in_flight.capture.observe(response)
        })
    }
}

/// Records on drop, so a handler fault or a cancelled request is still counted.
struct InFlight<'a> {
    sink: &'a dyn MetricsSink,
    method: String,
    path: String,
    started: Instant,
    capture: StatusCapture,
}

impl<'a> InFlight<'a> {
    fn start(sink: &'a dyn MetricsSink, request: &Request) -> Self {
        Self {
            sink,
            method: request.method().as_str().to_string(),
            path: request.uri().path().to_string(),
            started: Instant::now(),
            capture: StatusCapture::new(),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let status = if self.capture.observed() {
            self.capture.status()
        } else {
            tracing::warn!(
                method = %self.method,
                path = %self.path,
                "Request ended without a response"
            );
            ABORTED_STATUS
        };

        self.sink.record_request(&RequestOutcome {
            method: std::mem::take(&mut self.method),
            path: std::mem::take(&mut self.path),
            status,
            duration: self.started.elapsed(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::pipeline::Chain;
    use crate::observability::MemorySink;
    use axum::{body::Body, http, routing::get, Router};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(sink: Arc<MemorySink>) -> Router {
        let chain = Chain::new().then(RecordMetrics::new(sink));
        Router::new()
            .route("/ok", chain.wrap(get(|| async { "fine" })))
            .route(
                "/teapot",
                chain.wrap(get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") })),
            )
            .route(
                "/slow",
                chain.wrap(get(|| async {
                    tokio::time::sleep(Duration::from_millis(30)).await;
                    "late"
                })),
            )
    }

    async fn call(app: Router, method: &str, uri: &str) -> StatusCode {
        app.oneshot(
            http::Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_records_success() {
        let sink = Arc::new(MemorySink::new());
        assert_eq!(call(app(sink.clone()), "GET", "/ok").await, StatusCode::OK);

        let outcomes = sink.outcomes();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].method, "GET");
        assert_eq!(outcomes[0].path, "/ok");
        assert_eq!(outcomes[0].status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_records_handler_chosen_status() {
        let sink = Arc::new(MemorySink::new());
        assert_eq!(
            call(app(sink.clone()), "GET", "/teapot").await,
            StatusCode::IM_A_TEAPOT
        );
        assert_eq!(sink.request_count("GET", "/teapot", StatusCode::IM_A_TEAPOT), 1);
    }

    #[tokio::test]
    async fn test_duration_covers_handler() {
        let sink = Arc::new(MemorySink::new());
        call(app(sink.clone()), "GET", "/slow").await;
        assert!(sink.outcomes()[0].duration >= Duration::from_millis(30));
    }

    #[test]
    fn test_dropped_without_response_records_server_error() {
        let sink = MemorySink::new();
        let request = http::Request::builder()
            .method("POST")
            .uri("/api/payment/simulate")
            .body(Body::empty())
            .unwrap();
        drop(InFlight::start(&sink, &request));

        let outcomes = sink.outcomes();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, ABORTED_STATUS);
        assert_eq!(outcomes[0].path, "/api/payment/simulate");
    }
}
