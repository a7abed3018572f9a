//! Configuration for the adaptive poll schedule.

use serde::{Deserialize, Serialize};

/// Longest delay or TTL accepted from configuration: one day.
pub const MAX_INTERVAL_SECONDS: u64 = 86_400;

/// Poll intervals, ETA thresholds, jitter and failure backoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval when the next train is between the two thresholds
    pub baseline_seconds: u64,
    /// Interval when a train is due under `aggressive_threshold_seconds`
    pub aggressive_seconds: u64,
    /// Interval when the next train is beyond `relaxed_threshold_seconds`
    pub relaxed_seconds: u64,
    /// Interval when the station has no arrivals listed
    pub background_seconds: u64,
    pub aggressive_threshold_seconds: u64,
    pub relaxed_threshold_seconds: u64,
    /// Uniform jitter as a fraction of the base interval, in [0, 1)
    pub jitter_ratio: f64,
    /// Floor applied after jitter
    pub min_delay_seconds: u64,
    /// Delays after 1, 2, 3... consecutive failures; the last step repeats
    pub backoff_seconds: Vec<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            baseline_seconds: 30,
            aggressive_seconds: 15,
            relaxed_seconds: 90,
            background_seconds: 300,
            aggressive_threshold_seconds: 300,
            relaxed_threshold_seconds: 900,
            jitter_ratio: 0.1,
            min_delay_seconds: 5,
            backoff_seconds: vec![5, 10, 20, 40, 60],
        }
    }
}
