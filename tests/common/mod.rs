//! Shared helpers for trainboard integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use trainboard::feed::FeedConfig;

/// One feed message for `station`'s ToNY direction.
pub fn message(target: &str, seconds: &str, headsign: &str) -> Value {
    json!({
        "target": target,
        "secondsToArrival": seconds,
        "arrivalTimeMessage": format!("{} min", seconds.parse::<u32>().unwrap_or(0) / 60),
        "lineColor": "4D92FB,FF9900",
        "headSign": headsign,
        "lastUpdated": "2026-03-02T08:00:00.000-05:00"
    })
}

/// A feed document with a Hoboken board and a World Trade Center board.
pub fn sample_feed() -> Value {
    json!({
        "results": [
            {
                "consideredStation": "HOB",
                "destinations": [
                    {
                        "label": "ToNY",
                        "messages": [
                            message("33S", "540", "33rd Street"),
                            message("WTC", "180", "World Trade Center")
                        ]
                    },
                    {
                        "label": "ToNJ",
                        "messages": [message("JSQ", "720", "Journal Square")]
                    }
                ]
            },
            {
                "consideredStation": "WTC",
                "destinations": [
                    {"label": "ToNJ", "messages": [message("NWK", "60", "Newark")]}
                ]
            }
        ]
    })
}

/// Feed config pointed at a mock server.
pub fn feed_config(base_uri: &str, timeout_seconds: u64) -> FeedConfig {
    FeedConfig {
        url: format!("{}/bin/portauthority/ridepath.json", base_uri),
        timeout_seconds,
        ..Default::default()
    }
}

pub const FEED_PATH: &str = "/bin/portauthority/ridepath.json";
