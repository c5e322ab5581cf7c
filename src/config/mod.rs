//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, loaded by main)
//!     → process environment
//!     → loader.rs (read, default, validate)
//!     → Config (immutable)
//!     → shared via Arc inside AppContext
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated
//! - Secrets are wrapped so `Debug` output is redacted
//! - Connection strings only ever appear masked in diagnostics

pub mod loader;
pub mod mask;
pub mod schema;

pub use loader::ConfigError;
pub use mask::mask_connection_string;
pub use schema::Config;
