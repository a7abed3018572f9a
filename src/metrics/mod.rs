//! # Poll Metrics
//!
//! Counters and gauges describing the poll loop, exported in Prometheus text
//! format when `[metrics] listen` is configured.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `trainboard_polls_total{outcome, reason}` - Poll cycles by result; `reason`
//!   is set on failures only
//!
//! **Histograms:**
//! - `trainboard_fetch_latency_seconds` - Feed request latency
//!
//! **Gauges:**
//! - `trainboard_consecutive_failures` - Current failure streak
//! - `trainboard_consecutive_unchanged` - Current unchanged-payload streak
//! - `trainboard_stale` - 1 while the board is STALE
//! - `trainboard_arrivals` - Arrivals in the last good snapshot

use crate::freshness::FreshnessState;
use crate::outcome::PollOutcome;
use std::net::SocketAddr;

/// Record one poll cycle.
pub fn record_outcome(outcome: &PollOutcome, state: &FreshnessState) {
    match outcome {
        PollOutcome::Success(snapshot) => {
            metrics::counter!("trainboard_polls_total", "outcome" => "success").increment(1);
            metrics::gauge!("trainboard_arrivals").set(snapshot.arrivals.len() as f64);
        }
        PollOutcome::Failure { reason, .. } => {
            metrics::counter!("trainboard_polls_total",
                "outcome" => "failure",
                "reason" => reason.kind()
            )
            .increment(1);
        }
    }

    metrics::gauge!("trainboard_consecutive_failures").set(state.consecutive_failures as f64);
    metrics::gauge!("trainboard_consecutive_unchanged").set(state.consecutive_unchanged as f64);
    metrics::gauge!("trainboard_stale").set(if state.is_live() { 0.0 } else { 1.0 });
}

/// Record feed request latency.
pub fn record_fetch_latency(latency_ms: u32) {
    metrics::histogram!("trainboard_fetch_latency_seconds").record(latency_ms as f64 / 1000.0);
}

/// Install the Prometheus exporter with an HTTP listener on `listen`.
///
/// Must be called from within a tokio runtime.
pub fn setup_metrics(listen: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let latency_buckets = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

    PrometheusBuilder::new()
        .with_http_listener(listen)
        .set_buckets_for_metric(
            Matcher::Full("trainboard_fetch_latency_seconds".to_string()),
            latency_buckets,
        )?
        .install()?;

    Ok(())
}
