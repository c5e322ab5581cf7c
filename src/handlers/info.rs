use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::server::AppContext;

pub const SERVICE_NAME: &str = "payment-latency-api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoRecord {
    pub name: String,
    pub version: String,
    pub region: String,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

/// `GET /info`
pub async fn info(State(ctx): State<AppContext>) -> Json<InfoRecord> {
    Json(InfoRecord {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        region: ctx.config.region.clone(),
        environment: ctx.config.environment.clone(),
        timestamp: Utc::now(),
    })
}
