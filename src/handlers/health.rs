use std::time::{Duration, Instant};

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::handlers::millis_string;
use crate::http::server::AppContext;

/// Database state as reported by `/health`.
///
/// Derived only from whether a connection string was configured; nothing is
/// dialled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Connected,
    NotConfigured,
}

impl DatabaseStatus {
    pub fn from_configured(configured: bool) -> Self {
        if configured {
            DatabaseStatus::Connected
        } else {
            DatabaseStatus::NotConfigured
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub status: String,
    pub region: String,
    /// Time spent building this record. Cosmetic.
    pub latency_ms: String,
    pub database: DatabaseStatus,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub uptime_seconds: u64,
}

/// `GET /health`
pub async fn health(State(ctx): State<AppContext>) -> Json<HealthRecord> {
    let started = Instant::now();
    let database = DatabaseStatus::from_configured(ctx.config.database_configured());

    Json(HealthRecord {
        status: "healthy".to_string(),
        region: ctx.config.region.clone(),
        latency_ms: millis_string(started.elapsed()),
        database,
        timestamp: Utc::now(),
        environment: ctx.config.environment.clone(),
        uptime_seconds: round_to_secs(ctx.started_at.elapsed()),
    })
}

/// Whole seconds, halves rounded up.
fn round_to_secs(duration: Duration) -> u64 {
    ((duration.as_nanos() + 500_000_000) / 1_000_000_000) as u64
}
