//! Latest-value hand-off to the presentation layer.

use crate::arrivals::FeedSnapshot;
use crate::freshness::{FreshnessState, Verdict};
use crate::outcome::OutcomeSummary;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Everything a display needs after a poll cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardState {
    /// Last good snapshot; kept while the verdict is STALE
    pub snapshot: Option<Arc<FeedSnapshot>>,
    pub freshness: FreshnessState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_outcome: Option<OutcomeSummary>,
    /// Delay chosen before the next poll
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_poll_ms: Option<u64>,
    /// Completed poll cycles
    pub cycles: u64,
}

impl BoardState {
    pub fn verdict(&self) -> Verdict {
        self.freshness.verdict
    }
}

/// Reader side of the board channel. Always yields the newest state.
pub type BoardReceiver = watch::Receiver<BoardState>;

/// Writer side of the board channel, owned by the poller.
pub type BoardSender = watch::Sender<BoardState>;

/// Create the single-slot board channel.
pub fn board_channel() -> (BoardSender, BoardReceiver) {
    watch::channel(BoardState::default())
}
