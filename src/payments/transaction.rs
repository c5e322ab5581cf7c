//! Transaction identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Issues `txn_<unix-nanos>` identifiers.
///
/// The numeric part is strictly increasing across all callers, so two calls
/// within the same clock tick still get distinct ids.
#[derive(Debug, Default)]
pub struct TransactionIds {
    last: AtomicU64,
}

impl TransactionIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        let now = unix_nanos();
        let advance = |last: u64| now.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        format!("txn_{}", advance(previous))
    }
}

fn unix_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
