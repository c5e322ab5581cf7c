//! Region latency model.
//!
//! Each region maps to a base wait plus a uniform spread:
//!
//! | Region                   | Wait        |
//! |--------------------------|-------------|
//! | eu-west-1, eu-south-2    | [50, 100) ms  |
//! | us-east-1, us-east-2     | [100, 200) ms |
//! | sa-east-1                | [80, 160) ms  |
//! | anything else            | 100 ms        |

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the varying part of a simulated wait.
pub trait LatencySource: Send + Sync {
    /// Offset in milliseconds, expected in `[0, span_ms)`. `span_ms` is never 0.
    fn offset_ms(&self, span_ms: u64) -> u64;
}

/// Offset taken from the sub-second part of the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockJitter;

impl LatencySource for ClockJitter {
    fn offset_ms(&self, span_ms: u64) -> u64 {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::from(d.subsec_nanos()))
            .unwrap_or(0);
        nanos % span_ms
    }
}

/// Simulated processing profile of one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionProfile {
    pub base_ms: u64,
    /// Width of the uniform part; 0 means a fixed wait of `base_ms`.
    pub spread_ms: u64,
}

impl RegionProfile {
    pub const FALLBACK: RegionProfile = RegionProfile { base_ms: 100, spread_ms: 0 };

    pub fn for_region(region: &str) -> Self {
        match region {
            "eu-west-1" | "eu-south-2" => RegionProfile { base_ms: 50, spread_ms: 50 },
            "us-east-1" | "us-east-2" => RegionProfile { base_ms: 100, spread_ms: 100 },
            "sa-east-1" => RegionProfile { base_ms: 80, spread_ms: 80 },
            _ => Self::FALLBACK,
        }
    }

    /// Draw one wait. Always within `[base, base + spread)`.
    pub fn sample(&self, source: &dyn LatencySource) -> Duration {
        let offset = if self.spread_ms == 0 {
            0
        } else {
            source.offset_ms(self.spread_ms) % self.spread_ms
        };
        Duration::from_millis(self.base_ms + offset)
    }
}

/// Simulated processing time for a payment handled in `region`.
pub fn simulated_processing_time(region: &str, source: &dyn LatencySource) -> Duration {
    RegionProfile::for_region(region).sample(source)
}
