//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms behind MetricsSink)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → GET /metrics (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics live in a sink owned by the application context, not a global
//! - Request ID flows through the trace span of every request
//! - Secrets never reach either channel

pub mod logging;
pub mod metrics;

pub use self::metrics::{MemorySink, MetricsSink, PrometheusSink, RequestOutcome};
