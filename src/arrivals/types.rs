//! Arrival and snapshot types shared by the parser, classifier and scheduler.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single upcoming train at the configured station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalEntry {
    /// Route identifier as reported by the feed (e.g. "33S", "WTC")
    pub target: String,
    /// Destination shown on the train
    pub headsign: String,
    /// Direction group the record was listed under (e.g. "ToNY")
    pub label: String,
    /// Seconds until arrival, never negative
    pub seconds_to_arrival: u32,
    /// Free-form arrival text ("5 min", "Delayed")
    pub arrival_message: String,
    /// One color for a solid bar, two for a split bar
    pub line_colors: Vec<String>,
    /// Per-record update time, if the feed supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ArrivalEntry {
    /// Build an entry, clamping a negative ETA to zero.
    pub fn new(
        target: impl Into<String>,
        headsign: impl Into<String>,
        label: impl Into<String>,
        seconds_to_arrival: i64,
        arrival_message: impl Into<String>,
        line_colors: Vec<String>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        let seconds = seconds_to_arrival.clamp(0, u32::MAX as i64) as u32;
        Self {
            target: target.into(),
            headsign: headsign.into(),
            label: label.into(),
            seconds_to_arrival: seconds,
            arrival_message: arrival_message.into(),
            line_colors,
            last_updated,
        }
    }

    /// Whether two entries show the same train, ignoring the per-record
    /// update time the server refreshes on every publish.
    pub fn same_train(&self, other: &ArrivalEntry) -> bool {
        self.target == other.target
            && self.headsign == other.headsign
            && self.label == other.label
            && self.seconds_to_arrival == other.seconds_to_arrival
            && self.arrival_message == other.arrival_message
            && self.line_colors == other.line_colors
    }

    /// True when the line is drawn as two colors.
    pub fn is_split_color(&self) -> bool {
        self.line_colors.len() > 1
    }
}

/// Immutable result of one successful fetch for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    /// Station code the arrivals were filtered by
    pub station: String,
    /// Arrivals sorted ascending by ETA
    pub arrivals: Vec<ArrivalEntry>,
    /// Freshest server timestamp across arrivals, or the fetch time
    pub last_updated: DateTime<Utc>,
    /// Local time the document was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FeedSnapshot {
    /// ETA of the next train, if any.
    pub fn soonest_arrival(&self) -> Option<u32> {
        self.arrivals.first().map(|a| a.seconds_to_arrival)
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// First `limit` arrivals, for boards with a fixed number of cards.
    pub fn top(&self, limit: usize) -> &[ArrivalEntry] {
        &self.arrivals[..limit.min(self.arrivals.len())]
    }

    /// Whether the arrival list matches another snapshot's. Snapshot and
    /// per-record timestamps are ignored.
    pub fn same_arrivals(&self, other: &FeedSnapshot) -> bool {
        self.arrivals.len() == other.arrivals.len()
            && self
                .arrivals
                .iter()
                .zip(&other.arrivals)
                .all(|(a, b)| a.same_train(b))
    }
}
