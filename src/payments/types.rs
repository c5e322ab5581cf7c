//! Payment simulation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a simulated payment. Every simulation is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Approved,
}

/// Body of `POST /api/payment/simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub transaction_id: String,
    pub status: PaymentStatus,
    /// Simulated wait in milliseconds, two decimals.
    pub processing_time_ms: String,
    pub region: String,
    pub timestamp: DateTime<Utc>,
}
