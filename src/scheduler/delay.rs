//! Next-poll delay policy.
//!
//! Pure functions of the last outcome and the board contents, so every
//! backoff step and interval band can be checked in isolation.

use super::config::{PollingConfig, MAX_INTERVAL_SECONDS};
use crate::arrivals::FeedSnapshot;
use rand::Rng;
use std::time::Duration;

/// Delay after `consecutive_failures` failed polls in a row.
///
/// The first failure maps to the first step; counts past the end of the
/// table repeat the last step.
pub fn backoff_delay(consecutive_failures: u32, steps: &[u64]) -> Duration {
    let index = (consecutive_failures.max(1) - 1) as usize;
    let seconds = steps
        .get(index)
        .or_else(|| steps.last())
        .copied()
        .unwrap_or(0);
    Duration::from_secs(seconds)
}

/// Base interval, in seconds, for a board whose soonest arrival is `soonest`.
///
/// `None` means the station currently lists no arrivals.
pub fn base_interval(soonest: Option<u32>, config: &PollingConfig) -> u64 {
    match soonest {
        None => config.background_seconds,
        Some(eta) => {
            let eta = u64::from(eta);
            if eta < config.aggressive_threshold_seconds {
                config.aggressive_seconds
            } else if eta > config.relaxed_threshold_seconds {
                config.relaxed_seconds
            } else {
                config.baseline_seconds
            }
        }
    }
}

/// Apply symmetric uniform jitter of `± ratio * base`, floored at `min_seconds`
/// and capped at [`MAX_INTERVAL_SECONDS`].
pub fn jittered<R: Rng>(
    base_seconds: u64,
    ratio: f64,
    min_seconds: u64,
    rng: &mut R,
) -> Duration {
    let offset = if ratio > 0.0 {
        rng.random_range(-ratio..=ratio)
    } else {
        0.0
    };
    let seconds = (base_seconds as f64 * (1.0 + offset))
        .max(min_seconds as f64)
        .min(MAX_INTERVAL_SECONDS as f64);
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::from_secs(MAX_INTERVAL_SECONDS))
}

/// Delay before the next poll.
///
/// After a failure the backoff table applies without jitter. Otherwise the
/// interval band is chosen from the freshest snapshot and jittered.
pub fn next_delay<R: Rng>(
    last_poll_failed: bool,
    consecutive_failures: u32,
    last_good: Option<&FeedSnapshot>,
    config: &PollingConfig,
    rng: &mut R,
) -> Duration {
    if last_poll_failed {
        return backoff_delay(consecutive_failures, &config.backoff_seconds);
    }

    let base = base_interval(last_good.and_then(FeedSnapshot::soonest_arrival), config);
    jittered(base, config.jitter_ratio, config.min_delay_seconds, rng)
}
