//! Field extraction helpers for structured logging

use crate::outcome::PollOutcome;

/// Extract status, reason code and arrival count from a poll outcome
///
/// Returns a tuple of (status, reason, arrivals).
/// - Success: ("success", None, number of arrivals)
/// - Failure: ("failure", Some(reason code), 0)
///
/// # Examples
///
/// ```
/// use trainboard::feed::FetchError;
/// use trainboard::logging::extract_outcome;
/// use trainboard::outcome::PollOutcome;
///
/// let outcome = PollOutcome::Failure {
///     reason: FetchError::HttpStatus(502),
///     at: chrono::Utc::now(),
/// };
/// let (status, reason, arrivals) = extract_outcome(&outcome);
/// assert_eq!(status, "failure");
/// assert_eq!(reason.as_deref(), Some("http_status:502"));
/// assert_eq!(arrivals, 0);
/// ```
pub fn extract_outcome(outcome: &PollOutcome) -> (&'static str, Option<String>, usize) {
    match outcome {
        PollOutcome::Success(snapshot) => ("success", None, snapshot.arrivals.len()),
        PollOutcome::Failure { reason, .. } => ("failure", Some(reason.reason_code()), 0),
    }
}

/// Soonest ETA in seconds for a successful outcome
pub fn extract_soonest(outcome: &PollOutcome) -> Option<u32> {
    outcome.snapshot().and_then(|s| s.soonest_arrival())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{ArrivalEntry, FeedSnapshot};
    use chrono::Utc;
    use std::sync::Arc;

    fn success(etas: &[i64]) -> PollOutcome {
        let now = Utc::now();
        PollOutcome::Success(Arc::new(FeedSnapshot {
            station: "HOB".to_string(),
            arrivals: etas
                .iter()
                .map(|e| ArrivalEntry::new("33S", "", "", *e, "", vec![], None))
                .collect(),
            last_updated: now,
            fetched_at: now,
        }))
    }

    #[test]
    fn test_extract_outcome_success() {
        let (status, reason, arrivals) = extract_outcome(&success(&[60, 120]));
        assert_eq!(status, "success");
        assert!(reason.is_none());
        assert_eq!(arrivals, 2);
    }

    #[test]
    fn test_extract_soonest() {
        assert_eq!(extract_soonest(&success(&[60, 120])), Some(60));
        assert_eq!(extract_soonest(&success(&[])), None);
    }
}
