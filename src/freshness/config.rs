//! Configuration for staleness classification.

use serde::{Deserialize, Serialize};

/// Thresholds that decide when displayed arrivals stop being LIVE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalenessConfig {
    /// Consecutive failed polls before the board goes STALE
    pub failure_threshold: u32,
    /// Consecutive identical payloads that, past the TTL, mark the board STALE
    pub unchanged_threshold: u32,
    /// Maximum age of the last change before the board goes STALE
    pub ttl_seconds: u64,
    /// Shorter TTL used while a train is due soon
    pub ttl_aggressive_seconds: u64,
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            unchanged_threshold: 3,
            ttl_seconds: 45,
            ttl_aggressive_seconds: 20,
        }
    }
}

impl StalenessConfig {
    /// TTL in effect given the soonest ETA on the board.
    ///
    /// The aggressive TTL applies while a train is under
    /// `aggressive_threshold_seconds` away.
    pub fn active_ttl(&self, soonest: Option<u32>, aggressive_threshold_seconds: u64) -> u64 {
        match soonest {
            Some(eta) if u64::from(eta) < aggressive_threshold_seconds => {
                self.ttl_aggressive_seconds
            }
            _ => self.ttl_seconds,
        }
    }
}
