//! Configuration for the feed client.

use serde::{Deserialize, Serialize};

/// Default PATH real-time arrivals feed.
pub const DEFAULT_FEED_URL: &str = "https://www.panynj.gov/bin/portauthority/ridepath.json";

/// Where and how to fetch the feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Feed URL
    pub url: String,
    /// Hard timeout for one request, including reading the body
    pub timeout_seconds: u64,
    /// User-Agent header sent with each request
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_seconds: 5,
            user_agent: concat!("trainboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
