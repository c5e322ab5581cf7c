//! Payment Latency API
//!
//! A lightweight, observable stand-in for a payment API. Useful for load
//! testing dashboards, region latency demos and metrics pipeline smoke tests.
//! It never processes real payments.
//!
//! # Environment
//! - `DATABASE_URL` (required, never logged unmasked)
//! - `API_SECRET_KEY` (required, never logged)
//! - `REGION` (default `unknown`)
//! - `ENVIRONMENT` (default `dev`)
//! - `PORT` (default `8080`)
//! - `LOG_FORMAT` (`json` for JSON lines)

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;

use payment_latency_api::config::{mask_connection_string, Config};
use payment_latency_api::lifecycle::{wait_for_signal, Shutdown};
use payment_latency_api::observability::logging::{init_logging, LogFormat};
use payment_latency_api::observability::PrometheusSink;
use payment_latency_api::{AppContext, HttpServer};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging(LogFormat::from_env());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "payment-latency-api starting");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let database = config
        .database_url
        .as_ref()
        .map(|url| mask_connection_string(url.expose_secret()))
        .unwrap_or_else(|| "not configured".to_string());

    tracing::info!(
        region = %config.region,
        environment = %config.environment,
        port = config.port,
        database = %database,
        "Configuration loaded"
    );

    let metrics = match PrometheusSink::new() {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build metrics recorder");
            return ExitCode::FAILURE;
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(AppContext::new(config, metrics));

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    match server.run(listener, server_shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
