//! Payment Latency API Library
//!
//! A small observable stand-in for a payment API: health and metadata
//! endpoints plus a simulated payment whose latency depends on the
//! deployment region.
//!
//! ```text
//! request → RecordMetrics → [ApiKeyGate →] handler
//!                ↓
//!           MetricsSink → GET /metrics
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod payments;

pub use config::Config;
pub use http::{AppContext, HttpServer};
pub use lifecycle::Shutdown;
