//! Freshness state machine.

use super::config::StalenessConfig;
use crate::arrivals::FeedSnapshot;
use crate::outcome::PollOutcome;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;

/// LIVE/STALE classification shown next to the arrivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Live,
    Stale,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Live => write!(f, "LIVE"),
            Verdict::Stale => write!(f, "STALE"),
        }
    }
}

/// Why the board is STALE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleCause {
    /// No successful fetch yet
    NoData,
    /// Too many consecutive failed polls
    FailureThreshold,
    /// Payload unchanged for several polls and older than the TTL
    UnchangedPastTtl,
    /// Last change is older than the TTL
    TtlExpired,
}

impl fmt::Display for StaleCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StaleCause::NoData => "no_data",
            StaleCause::FailureThreshold => "failure_threshold",
            StaleCause::UnchangedPastTtl => "unchanged_past_ttl",
            StaleCause::TtlExpired => "ttl_expired",
        };
        f.write_str(s)
    }
}

/// A verdict flip, reported once per change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerdictTransition {
    pub from: Verdict,
    pub to: Verdict,
    /// Set when the new verdict is STALE
    pub cause: Option<StaleCause>,
}

/// Long-lived freshness tracking, updated once per poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshnessState {
    pub verdict: Verdict,
    /// Count of consecutive failed polls
    pub consecutive_failures: u32,
    /// Count of consecutive successful polls with an identical payload
    pub consecutive_unchanged: u32,
    /// When the arrivals last changed (or first arrived)
    pub last_change: Option<DateTime<Utc>>,
    /// Reason for the current STALE verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_cause: Option<StaleCause>,
}

impl Default for FreshnessState {
    fn default() -> Self {
        Self {
            verdict: Verdict::Stale,
            consecutive_failures: 0,
            consecutive_unchanged: 0,
            last_change: None,
            stale_cause: Some(StaleCause::NoData),
        }
    }
}

impl FreshnessState {
    pub fn is_live(&self) -> bool {
        self.verdict == Verdict::Live
    }

    /// Apply one poll outcome and re-derive the verdict.
    ///
    /// `previous` is the last good snapshot before this cycle; it is compared
    /// against a new snapshot to detect an unchanged payload, and stands in
    /// for the board contents when the poll failed.
    ///
    /// Returns the transition if the verdict changed.
    pub fn apply_outcome(
        &mut self,
        outcome: &PollOutcome,
        previous: Option<&FeedSnapshot>,
        now: DateTime<Utc>,
        config: &StalenessConfig,
        aggressive_threshold_seconds: u64,
    ) -> Option<VerdictTransition> {
        let current = match outcome {
            PollOutcome::Failure { .. } => {
                self.consecutive_failures += 1;
                previous
            }
            PollOutcome::Success(snapshot) => {
                self.consecutive_failures = 0;
                let unchanged = previous.is_some_and(|p| p.same_arrivals(snapshot));
                if unchanged && self.last_change.is_some() {
                    self.consecutive_unchanged += 1;
                } else {
                    self.consecutive_unchanged = 0;
                    self.last_change = Some(now);
                }
                Some(snapshot.as_ref())
            }
        };

        let ttl = config.active_ttl(
            current.and_then(FeedSnapshot::soonest_arrival),
            aggressive_threshold_seconds,
        );
        let cause = self.stale_cause_at(now, ttl, config);

        let old = self.verdict;
        self.verdict = if cause.is_some() {
            Verdict::Stale
        } else {
            Verdict::Live
        };
        self.stale_cause = cause;

        (old != self.verdict).then_some(VerdictTransition {
            from: old,
            to: self.verdict,
            cause,
        })
    }

    /// Seconds since the arrivals last changed.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_change
            .map(|t| now.signed_duration_since(t).num_seconds())
    }

    fn stale_cause_at(
        &self,
        now: DateTime<Utc>,
        ttl_seconds: u64,
        config: &StalenessConfig,
    ) -> Option<StaleCause> {
        let Some(last_change) = self.last_change else {
            return Some(StaleCause::NoData);
        };

        let expired = TimeDelta::try_seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX))
            .is_some_and(|ttl| now.signed_duration_since(last_change) > ttl);

        if expired && self.consecutive_unchanged >= config.unchanged_threshold {
            Some(StaleCause::UnchangedPastTtl)
        } else if expired {
            // Age alone is enough, whatever the counters say
            Some(StaleCause::TtlExpired)
        } else if self.consecutive_failures >= config.failure_threshold {
            Some(StaleCause::FailureThreshold)
        } else {
            None
        }
    }
}
