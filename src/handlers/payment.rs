use std::time::Instant;

use axum::{extract::State, Json};
use chrono::Utc;

use crate::handlers::millis_string;
use crate::http::server::AppContext;
use crate::payments::{simulated_processing_time, PaymentRecord, PaymentStatus};

/// `POST /api/payment/simulate`
///
/// Waits for the region's simulated processing time, then approves. Only this
/// request's task waits; other requests keep being served.
pub async fn simulate_payment(State(ctx): State<AppContext>) -> Json<PaymentRecord> {
    let started = Instant::now();
    let region = ctx.config.region.clone();

    let processing = simulated_processing_time(&region, ctx.latency.as_ref());
    tokio::time::sleep(processing).await;
    ctx.metrics.record_payment_processing(processing);

    let record = PaymentRecord {
        transaction_id: ctx.transactions.next_id(),
        status: PaymentStatus::Approved,
        processing_time_ms: millis_string(processing),
        region,
        timestamp: Utc::now(),
    };

    tracing::info!(
        transaction_id = %record.transaction_id,
        region = %record.region,
        elapsed = ?started.elapsed(),
        "Payment processed"
    );

    Json(record)
}
