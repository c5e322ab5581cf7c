//! Payment simulation.
//!
//! Nothing here moves money: a payment is a region-dependent wait followed by
//! an approved record with a fresh transaction id.

pub mod latency;
pub mod transaction;
pub mod types;

pub use latency::{simulated_processing_time, ClockJitter, LatencySource, RegionProfile};
pub use transaction::TransactionIds;
pub use types::{PaymentRecord, PaymentStatus};
