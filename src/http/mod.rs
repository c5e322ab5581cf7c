//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span, panic capture)
//!     → pipeline.rs (per-route interceptor chain)
//!         → middleware/metrics.rs (timer + capture.rs)
//!         → middleware/auth.rs (protected routes)
//!     → handlers
//!     → response.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod capture;
pub mod middleware;
pub mod pipeline;
pub mod response;
pub mod server;

pub use pipeline::{Chain, Interceptor};
pub use response::ApiError;
pub use server::{build_router, AppContext, HttpServer};
