//! Adaptive poll loop.
//!
//! Runs fetch → parse → classify → delay → sleep on a background task and
//! publishes the newest [`BoardState`] after every cycle. The poller is the
//! only writer of freshness state and the last good snapshot.

mod board;
mod config;
pub mod delay;


pub use board::{board_channel, BoardReceiver, BoardSender, BoardState};
pub use config::*;

use crate::arrivals::{parse_station_feed, FeedSnapshot};
use crate::config::TrainboardConfig;
use crate::feed::{FeedClient, FeedSource, FetchError, FetchResult};
use crate::freshness::{FreshnessState, StalenessConfig, Verdict, VerdictTransition};
use crate::outcome::{OutcomeSummary, PollOutcome};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// What one cycle did, for callers driving the poller by hand.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub outcome: OutcomeSummary,
    pub verdict: Verdict,
    pub transition: Option<VerdictTransition>,
    pub next_delay: Duration,
}

/// Background service that polls the feed on an adaptive schedule.
pub struct Poller {
    /// Where feed documents come from
    source: Arc<dyn FeedSource>,
    /// Station code arrivals are filtered by
    station: String,
    polling: PollingConfig,
    staleness: StalenessConfig,
    /// Freshness tracking across cycles
    state: FreshnessState,
    /// Last successfully parsed snapshot, shown while STALE
    last_good: Option<Arc<FeedSnapshot>>,
    cycles: u64,
    board: BoardSender,
}

impl Poller {
    /// Create a poller over any feed source.
    pub fn new(
        source: Arc<dyn FeedSource>,
        station: impl Into<String>,
        polling: PollingConfig,
        staleness: StalenessConfig,
    ) -> Self {
        let (board, _) = board_channel();
        Self {
            source,
            station: station.into(),
            polling,
            staleness,
            state: FreshnessState::default(),
            last_good: None,
            cycles: 0,
            board,
        }
    }

    /// Create a poller with an HTTP feed client built from configuration.
    pub fn from_config(config: &TrainboardConfig) -> Result<Self, FetchError> {
        let client = FeedClient::new(config.feed.clone())?;
        Ok(Self::new(
            Arc::new(client),
            config.station.clone(),
            config.polling.clone(),
            config.staleness.clone(),
        ))
    }

    /// Subscribe to board updates. Readers only ever see the newest state.
    pub fn subscribe(&self) -> BoardReceiver {
        self.board.subscribe()
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn freshness(&self) -> &FreshnessState {
        &self.state
    }

    pub fn last_good(&self) -> Option<&Arc<FeedSnapshot>> {
        self.last_good.as_ref()
    }

    /// Fetch once and run the rest of the cycle.
    pub async fn poll_once(&mut self) -> CycleReport {
        let fetch = self.source.fetch().await;
        self.apply_fetch(fetch)
    }

    /// Turn a fetch result into an outcome for the configured station.
    fn to_outcome(&self, fetch: FetchResult) -> PollOutcome {
        match fetch {
            FetchResult::Success {
                document,
                fetched_at,
                ..
            } => match parse_station_feed(&document, &self.station, fetched_at) {
                Ok(snapshot) => PollOutcome::Success(Arc::new(snapshot)),
                Err(e) => PollOutcome::Failure {
                    reason: e.into(),
                    at: fetched_at,
                },
            },
            FetchResult::Failure { error, at } => PollOutcome::Failure { reason: error, at },
        }
    }

    /// Parse, classify, choose the next delay and publish.
    ///
    /// The outcome's own timestamp is the classification clock.
    pub fn apply_fetch(&mut self, fetch: FetchResult) -> CycleReport {
        let outcome = self.to_outcome(fetch);
        let now = outcome_time(&outcome);

        let transition = self.state.apply_outcome(
            &outcome,
            self.last_good.as_deref(),
            now,
            &self.staleness,
            self.polling.aggressive_threshold_seconds,
        );

        if let PollOutcome::Success(snapshot) = &outcome {
            self.last_good = Some(Arc::clone(snapshot));
        }

        let next_delay = delay::next_delay(
            outcome.is_failure(),
            self.state.consecutive_failures,
            self.last_good.as_deref(),
            &self.polling,
            &mut rand::rng(),
        );

        self.cycles += 1;
        crate::logging::log_outcome(&self.station, &outcome, &self.state, next_delay);
        crate::metrics::record_outcome(&outcome, &self.state);
        if let Some(transition) = &transition {
            crate::logging::log_transition(&self.station, transition, &self.state);
        }

        let summary = outcome.summary();
        self.board.send_replace(BoardState {
            snapshot: self.last_good.clone(),
            freshness: self.state.clone(),
            last_outcome: Some(summary.clone()),
            next_poll_ms: Some(next_delay.as_millis() as u64),
            cycles: self.cycles,
        });

        CycleReport {
            outcome: summary,
            verdict: self.state.verdict,
            transition,
            next_delay,
        }
    }

    /// Start the poll loop on a background task.
    ///
    /// The first poll runs immediately. The loop stops between cycles once
    /// `cancel_token` fires; an in-flight fetch is bounded by the feed timeout.
    pub fn start(mut self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                station = %self.station,
                feed = %self.source.describe(),
                "Poller started"
            );

            loop {
                if cancel_token.is_cancelled() {
                    break;
                }

                let report = self.poll_once().await;

                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = tokio::time::sleep(report.next_delay) => {}
                }
            }

            tracing::info!(cycles = self.cycles, "Poller shutting down");
        })
    }
}

fn outcome_time(outcome: &PollOutcome) -> DateTime<Utc> {
    match outcome {
        PollOutcome::Success(snapshot) => snapshot.fetched_at,
        PollOutcome::Failure { at, .. } => *at,
    }
}
