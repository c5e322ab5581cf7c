//! Route handlers.
//!
//! Each handler is a function of the application context and the current
//! time to a JSON record. Auth and metrics are applied around them by the
//! interceptor chains in `http::server`.

mod health;
mod info;
mod metrics;
mod payment;

use std::time::Duration;

pub use health::{health, DatabaseStatus, HealthRecord};
pub use info::{info, InfoRecord, SERVICE_NAME};
pub use self::metrics::metrics;
pub use payment::simulate_payment;

/// Milliseconds with two decimals, from whole microseconds.
pub(crate) fn millis_string(duration: Duration) -> String {
    format!("{:.2}", duration.as_micros() as f64 / 1000.0)
}
