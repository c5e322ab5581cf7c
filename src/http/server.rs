//! HTTP server setup.
//!
//! # Responsibilities
//! - Hold the application context shared by handlers and interceptors
//! - Build the Axum router with per-route interceptor chains
//! - Wire up cross-cutting layers (trace spans, request ID, panic capture)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::handlers;
use crate::http::middleware::{ApiKeyGate, RecordMetrics};
use crate::http::pipeline::Chain;
use crate::lifecycle::shutdown::notified;
use crate::observability::MetricsSink;
use crate::payments::{ClockJitter, LatencySource, TransactionIds};

/// Everything a request may read, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub metrics: Arc<dyn MetricsSink>,
    pub latency: Arc<dyn LatencySource>,
    pub transactions: Arc<TransactionIds>,
    pub started_at: Instant,
}

impl AppContext {
    pub fn new(config: Config, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
            latency: Arc::new(ClockJitter),
            transactions: Arc::new(TransactionIds::new()),
            started_at: Instant::now(),
        }
    }

    /// Replace the source of simulated payment jitter.
    pub fn with_latency_source(mut self, source: Arc<dyn LatencySource>) -> Self {
        self.latency = source;
        self
    }
}

/// Build the router with all routes and layers.
pub fn build_router(ctx: AppContext) -> Router {
    let instrumented = Chain::new().then(RecordMetrics::new(Arc::clone(&ctx.metrics)));
    let protected = instrumented
        .clone()
        .then(ApiKeyGate::new(ctx.config.secret_key.clone()));

    Router::new()
        .route("/health", instrumented.wrap(get(handlers::health)))
        .route("/info", instrumented.wrap(get(handlers::info)))
        .route(
            "/api/payment/simulate",
            protected.wrap(post(handlers::simulate_payment)),
        )
        .route("/metrics", get(handlers::metrics))
        .with_state(ctx)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP server for the payment latency API.
pub struct HttpServer {
    router: Router,
    ctx: AppContext,
}

impl HttpServer {
    pub fn new(ctx: AppContext) -> Self {
        let router = build_router(ctx.clone());
        Self { router, ctx }
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            region = %self.ctx.config.region,
            environment = %self.ctx.config.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(notified(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
