//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;

use payment_latency_api::observability::MemorySink;
use payment_latency_api::payments::LatencySource;
use payment_latency_api::{AppContext, Config, HttpServer, Shutdown};

pub const SECRET: &str = "s3cr3t";
pub const PAYMENT_PATH: &str = "/api/payment/simulate";

/// Latency source that counts how often the payment handler ran.
#[derive(Default)]
pub struct CountingSource {
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LatencySource for CountingSource {
    fn offset_ms(&self, _span_ms: u64) -> u64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        0
    }
}

pub struct TestApp {
    pub router: Router,
    pub sink: Arc<MemorySink>,
    pub source: Arc<CountingSource>,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        let sink = Arc::new(MemorySink::new());
        let source = Arc::new(CountingSource::default());
        let ctx = AppContext::new(config, sink.clone()).with_latency_source(source.clone());
        Self {
            router: payment_latency_api::http::build_router(ctx),
            sink,
            source,
        }
    }

    pub fn with_region(region: &str) -> Self {
        Self::new(
            Config::new(SECRET)
                .with_region(region)
                .with_database_url("postgres://payments:pw@db.internal:5432/payments"),
        )
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn pay(&self, key: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::post(PAYMENT_PATH);
        if let Some(key) = key {
            builder = builder.header("X-API-Key", key);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }
}

/// A server bound to an ephemeral port, stopped when `stop` is called.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub sink: Arc<MemorySink>,
    shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub async fn start(config: Config) -> Self {
        let sink = Arc::new(MemorySink::new());
        let server = HttpServer::new(AppContext::new(config, sink.clone()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let handle = tokio::spawn(server.run(listener, rx));

        Self {
            addr,
            sink,
            shutdown,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }
}
