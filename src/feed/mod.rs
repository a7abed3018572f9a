//! Feed client for the remote arrivals document.
//!
//! Performs exactly one bounded GET per call and reports either the decoded
//! JSON document or a typed failure. Retry policy lives in the scheduler.

mod config;
mod error;


pub use config::*;
pub use error::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Result of a single feed fetch.
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Feed responded with a JSON document
    Success {
        document: serde_json::Value,
        fetched_at: DateTime<Utc>,
        latency_ms: u32,
    },
    /// Feed could not be fetched or decoded
    Failure {
        error: FetchError,
        at: DateTime<Utc>,
    },
}

/// Source of raw feed documents.
///
/// Object-safe so the scheduler can hold `Arc<dyn FeedSource>`; tests swap in
/// scripted sources.
#[async_trait]
pub trait FeedSource: Send + Sync + 'static {
    /// Fetch the document once. Must not retry.
    async fn fetch(&self) -> FetchResult;

    /// Human-readable location, for logs.
    fn describe(&self) -> &str;
}

/// HTTP implementation of [`FeedSource`].
pub struct FeedClient {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    config: FeedConfig,
}

impl FeedClient {
    /// Create a client with the configured timeout and User-Agent.
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self) -> FetchResult {
        let start = Instant::now();
        let timeout_seconds = self.config.timeout_seconds;

        let response = match self
            .client
            .get(&self.config.url)
            .timeout(Duration::from_secs(timeout_seconds))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return FetchResult::Failure {
                    error: FetchError::from_reqwest(e, timeout_seconds),
                    at: Utc::now(),
                }
            }
        };

        if !response.status().is_success() {
            return FetchResult::Failure {
                error: FetchError::HttpStatus(response.status().as_u16()),
                at: Utc::now(),
            };
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return FetchResult::Failure {
                    error: FetchError::from_reqwest(e, timeout_seconds),
                    at: Utc::now(),
                }
            }
        };
        let latency_ms = start.elapsed().as_millis() as u32;
        crate::metrics::record_fetch_latency(latency_ms);

        match serde_json::from_slice(&body) {
            Ok(document) => FetchResult::Success {
                document,
                fetched_at: Utc::now(),
                latency_ms,
            },
            Err(e) => FetchResult::Failure {
                error: FetchError::Parse(e.to_string()),
                at: Utc::now(),
            },
        }
    }

    fn describe(&self) -> &str {
        &self.config.url
    }
}
