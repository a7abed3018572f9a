//! Feed document parsing.
//!
//! The feed lists every station; each station record groups messages by
//! direction:
//!
//! ```json
//! {"results": [{"consideredStation": "HOB",
//!               "destinations": [{"label": "ToNY",
//!                                 "messages": [{"target": "33S",
//!                                               "secondsToArrival": "300",
//!                                               "arrivalTimeMessage": "5 min",
//!                                               "lineColor": "4D92FB,FF9900",
//!                                               "headSign": "33rd Street",
//!                                               "lastUpdated": "2024-01-01T12:00:00-05:00"}]}]}]}
//! ```

use super::colors::parse_line_colors;
use super::error::ParseError;
use super::types::{ArrivalEntry, FeedSnapshot};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct StationRecord {
    #[serde(default)]
    destinations: Vec<DestinationRecord>,
}

#[derive(Deserialize)]
struct DestinationRecord {
    #[serde(default)]
    label: String,
    #[serde(default)]
    messages: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    #[serde(default)]
    target: String,
    #[serde(default = "MessageRecord::default_seconds")]
    seconds_to_arrival: Option<RawSeconds>,
    #[serde(default)]
    arrival_time_message: String,
    #[serde(default)]
    line_color: String,
    #[serde(default)]
    head_sign: String,
    #[serde(default)]
    last_updated: Option<String>,
}

impl MessageRecord {
    fn default_seconds() -> Option<RawSeconds> {
        Some(RawSeconds::Int(0))
    }
}

/// The feed sends ETAs as strings; numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawSeconds {
    fn as_seconds(&self) -> Option<i64> {
        match self {
            RawSeconds::Int(n) => Some(*n),
            RawSeconds::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            RawSeconds::Float(_) => None,
            RawSeconds::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parse an RFC 3339 timestamp; a value without an offset is taken as UTC.
pub fn parse_last_updated(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_message(label: &str, raw: Value) -> Option<ArrivalEntry> {
    let message: MessageRecord = match serde_json::from_value(raw) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(error = %e, "Skipping malformed arrival message");
            return None;
        }
    };

    let Some(seconds) = message.seconds_to_arrival.as_ref().and_then(RawSeconds::as_seconds)
    else {
        tracing::debug!(route = %message.target, "Skipping message without a usable ETA");
        return None;
    };

    Some(ArrivalEntry::new(
        message.target.trim(),
        message.head_sign.trim(),
        label.trim(),
        seconds,
        message.arrival_time_message.trim(),
        parse_line_colors(&message.line_color),
        message.last_updated.as_deref().and_then(parse_last_updated),
    ))
}

/// Build a snapshot of arrivals for `station` from a raw feed document.
///
/// Fails only when the document lacks the `results` array. A station that
/// is absent from the feed yields an empty snapshot.
pub fn parse_station_feed(
    raw: &Value,
    station: &str,
    fetched_at: DateTime<Utc>,
) -> Result<FeedSnapshot, ParseError> {
    let object = raw.as_object().ok_or(ParseError::NotAnObject)?;
    let results = object
        .get("results")
        .ok_or(ParseError::MissingField("results"))?
        .as_array()
        .ok_or(ParseError::InvalidField {
            field: "results",
            expected: "an array",
        })?;

    let mut arrivals = Vec::new();
    for raw_station in results {
        if raw_station.get("consideredStation").and_then(Value::as_str) != Some(station) {
            continue;
        }
        let record: StationRecord = match serde_json::from_value(raw_station.clone()) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(station, error = %e, "Skipping malformed station record");
                continue;
            }
        };

        for destination in record.destinations {
            arrivals.extend(
                destination
                    .messages
                    .into_iter()
                    .filter_map(|m| parse_message(&destination.label, m)),
            );
        }
    }

    // Vec::sort_by_key is stable, so equal ETAs keep feed order
    arrivals.sort_by_key(|a| a.seconds_to_arrival);

    let last_updated = arrivals
        .iter()
        .filter_map(|a| a.last_updated)
        .max()
        .unwrap_or(fetched_at);

    Ok(FeedSnapshot {
        station: station.to_string(),
        arrivals,
        last_updated,
        fetched_at,
    })
}
