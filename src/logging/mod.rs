//! Structured logging for poll cycles
//!
//! This module builds the tracing filter from configuration and emits one
//! structured event per poll outcome and per verdict transition.

pub mod fields;

pub use fields::{extract_outcome, extract_soonest};

use crate::freshness::{FreshnessState, VerdictTransition};
use crate::outcome::PollOutcome;
use std::time::Duration;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Arguments
///
/// * `config` - The logging configuration
///
/// # Returns
///
/// A filter string in the format: "base_level,trainboard::component1=level1,trainboard::component2=level2"
///
/// # Examples
///
/// ```
/// use trainboard::config::logging::LoggingConfig;
/// use trainboard::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("scheduler".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: trainboard::config::logging::LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,trainboard::scheduler=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",trainboard::{}={}", component, level));
        }
    }

    filter_str
}

/// Log the outcome of one poll cycle.
///
/// Failures are warnings; they never stop the loop.
pub fn log_outcome(
    station: &str,
    outcome: &PollOutcome,
    state: &FreshnessState,
    next_delay: Duration,
) {
    let (status, reason, arrivals) = extract_outcome(outcome);
    let delay_ms = next_delay.as_millis() as u64;

    match outcome {
        PollOutcome::Success(_) => tracing::debug!(
            station,
            outcome = status,
            arrivals,
            soonest_s = ?extract_soonest(outcome),
            unchanged = state.consecutive_unchanged,
            verdict = %state.verdict,
            delay_ms,
            "Poll succeeded"
        ),
        PollOutcome::Failure { reason: error, .. } => tracing::warn!(
            station,
            outcome = status,
            reason = reason.as_deref().unwrap_or_default(),
            error = %error,
            failures = state.consecutive_failures,
            verdict = %state.verdict,
            delay_ms,
            "Poll failed"
        ),
    }
}

/// Log a LIVE/STALE transition.
pub fn log_transition(station: &str, transition: &VerdictTransition, state: &FreshnessState) {
    tracing::info!(
        station,
        old_verdict = %transition.from,
        new_verdict = %transition.to,
        cause = %transition.cause.map(|c| c.to_string()).unwrap_or_default(),
        failures = state.consecutive_failures,
        unchanged = state.consecutive_unchanged,
        "Board freshness changed"
    );
}
