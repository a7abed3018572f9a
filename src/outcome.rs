//! Per-cycle poll outcome.

use crate::arrivals::FeedSnapshot;
use crate::feed::FetchError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// What one fetch-and-parse cycle produced.
///
/// Consumed by the freshness classifier and the delay policy, then dropped.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Feed fetched and parsed; the snapshot may have no arrivals
    Success(Arc<FeedSnapshot>),
    /// Fetch or parse failed
    Failure {
        reason: FetchError,
        at: DateTime<Utc>,
    },
}

impl PollOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PollOutcome::Failure { .. })
    }

    pub fn snapshot(&self) -> Option<&Arc<FeedSnapshot>> {
        match self {
            PollOutcome::Success(snapshot) => Some(snapshot),
            PollOutcome::Failure { .. } => None,
        }
    }

    /// Compact form retained for publishing after the cycle ends.
    pub fn summary(&self) -> OutcomeSummary {
        match self {
            PollOutcome::Success(snapshot) => OutcomeSummary {
                ok: true,
                reason: None,
                arrivals: snapshot.arrivals.len(),
                at: snapshot.fetched_at,
            },
            PollOutcome::Failure { reason, at } => OutcomeSummary {
                ok: false,
                reason: Some(reason.reason_code()),
                arrivals: 0,
                at: *at,
            },
        }
    }
}

/// Serializable digest of a [`PollOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeSummary {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub arrivals: usize,
    pub at: DateTime<Utc>,
}
