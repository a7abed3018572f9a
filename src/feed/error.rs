//! Error types for feed fetching.

use crate::arrivals::ParseError;
use thiserror::Error;

/// Reasons a poll produced no usable feed document.
///
/// None of these stop the poll loop; each becomes a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection, DNS or TLS failure
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Body is not JSON, or lacks the expected structure
    #[error("invalid feed: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short machine-readable reason used in logs and metric labels.
    pub fn reason_code(&self) -> String {
        match self {
            FetchError::Timeout(_) => "timeout".to_string(),
            FetchError::Network(_) => "network".to_string(),
            FetchError::HttpStatus(code) => format!("http_status:{}", code),
            FetchError::Parse(_) => "parse_error".to_string(),
        }
    }

    /// Reason category without the status code, for bounded metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::Network(_) => "network",
            FetchError::HttpStatus(_) => "http_status",
            FetchError::Parse(_) => "parse_error",
        }
    }

    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(timeout_seconds)
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<ParseError> for FetchError {
    fn from(e: ParseError) -> Self {
        FetchError::Parse(e.to_string())
    }
}
