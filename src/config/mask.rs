//! Masking for connection-like secrets rendered in diagnostics.

/// Placeholder rendered for short secrets and appended to long ones.
pub const MASKED: &str = "***MASKED***";

const MIN_REVEAL_LEN: usize = 20;
const REVEALED_PREFIX: usize = 15;

/// Render a connection string safely for logs.
///
/// Inputs shorter than 20 characters become `***MASKED***`; longer inputs keep
/// their first 15 characters followed by `...***MASKED***`.
pub fn mask_connection_string(value: &str) -> String {
    if value.chars().count() < MIN_REVEAL_LEN {
        return MASKED.to_string();
    }
    let prefix: String = value.chars().take(REVEALED_PREFIX).collect();
    format!("{prefix}...{MASKED}")
}
