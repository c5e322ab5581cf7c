use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::http::server::AppContext;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// `GET /metrics`, Prometheus text exposition. Not itself instrumented.
pub async fn metrics(State(ctx): State<AppContext>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        ctx.metrics.render(),
    )
}
