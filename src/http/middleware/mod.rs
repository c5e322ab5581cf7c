//! Interceptors applied to routes.
//!
//! # Order
//! ```text
//! RecordMetrics (outermost, sees every final status)
//!     → ApiKeyGate (protected routes only, innermost)
//!     → handler
//! ```

pub mod auth;
pub mod metrics;

pub use auth::{ApiKeyGate, X_API_KEY};
pub use self::metrics::RecordMetrics;
