//! Configuration module for trainboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TRAINBOARD_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use trainboard::config::TrainboardConfig;
//!
//! // Load defaults
//! let config = TrainboardConfig::default();
//! assert_eq!(config.station, "HOB");
//!
//! // Parse from TOML
//! let toml = r#"
//! station = "WTC"
//! [polling]
//! baseline_seconds = 20
//! "#;
//! let config: TrainboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.station, "WTC");
//! assert_eq!(config.polling.baseline_seconds, 20);
//! ```

pub mod display;
pub mod error;
pub mod logging;
pub mod metrics;

pub use display::DisplayConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use metrics::MetricsConfig;

pub use crate::feed::FeedConfig;
pub use crate::freshness::StalenessConfig;
pub use crate::scheduler::{PollingConfig, MAX_INTERVAL_SECONDS};

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Station shown when none is configured.
pub const DEFAULT_STATION: &str = "HOB";

/// Unified configuration for the arrivals board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainboardConfig {
    /// Station code arrivals are filtered by, e.g. "HOB"
    pub station: String,
    /// Feed endpoint and request settings
    pub feed: FeedConfig,
    /// Adaptive poll schedule
    pub polling: PollingConfig,
    /// LIVE/STALE thresholds
    pub staleness: StalenessConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl Default for TrainboardConfig {
    fn default() -> Self {
        Self {
            station: DEFAULT_STATION.to_string(),
            feed: FeedConfig::default(),
            polling: PollingConfig::default(),
            staleness: StalenessConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl TrainboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports TRAINBOARD_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(station) = std::env::var("TRAINBOARD_STATION") {
            self.station = station;
        }
        if let Ok(url) = std::env::var("TRAINBOARD_FEED_URL") {
            self.feed.url = url;
        }
        if let Ok(timeout) = std::env::var("TRAINBOARD_FEED_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.feed.timeout_seconds = t;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("TRAINBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRAINBOARD_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(listen) = std::env::var("TRAINBOARD_METRICS_LISTEN") {
            self.metrics.listen = Some(listen);
        }

        self
    }

    /// Parsed metrics listener address, if one is configured.
    pub fn metrics_listen(&self) -> Result<Option<SocketAddr>, ConfigError> {
        self.metrics
            .listen
            .as_deref()
            .map(|addr| {
                addr.parse()
                    .map_err(|_| ConfigError::invalid("metrics.listen", "expected host:port"))
            })
            .transpose()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.station.trim().is_empty() {
            return Err(ConfigError::invalid("station", "station code cannot be empty"));
        }

        if self.feed.url.is_empty() {
            return Err(ConfigError::invalid("feed.url", "URL cannot be empty"));
        }
        if self.feed.timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "feed.timeout_seconds",
                "timeout must be non-zero",
            ));
        }

        let polling = &self.polling;
        if !(0.0..1.0).contains(&polling.jitter_ratio) {
            return Err(ConfigError::invalid(
                "polling.jitter_ratio",
                "jitter must be in [0, 1)",
            ));
        }
        if polling.backoff_seconds.is_empty() {
            return Err(ConfigError::invalid(
                "polling.backoff_seconds",
                "backoff table needs at least one step",
            ));
        }
        if polling.aggressive_threshold_seconds > polling.relaxed_threshold_seconds {
            return Err(ConfigError::invalid(
                "polling.aggressive_threshold_seconds",
                "must not exceed relaxed_threshold_seconds",
            ));
        }
        for (field, value) in [
            ("polling.baseline_seconds", polling.baseline_seconds),
            ("polling.aggressive_seconds", polling.aggressive_seconds),
            ("polling.relaxed_seconds", polling.relaxed_seconds),
            ("polling.background_seconds", polling.background_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(field, "interval must be non-zero"));
            }
        }

        let bounded = [
            ("feed.timeout_seconds", self.feed.timeout_seconds),
            ("polling.baseline_seconds", polling.baseline_seconds),
            ("polling.aggressive_seconds", polling.aggressive_seconds),
            ("polling.relaxed_seconds", polling.relaxed_seconds),
            ("polling.background_seconds", polling.background_seconds),
            ("polling.min_delay_seconds", polling.min_delay_seconds),
            ("staleness.ttl_seconds", self.staleness.ttl_seconds),
            (
                "staleness.ttl_aggressive_seconds",
                self.staleness.ttl_aggressive_seconds,
            ),
        ];
        let steps = polling
            .backoff_seconds
            .iter()
            .map(|step| ("polling.backoff_seconds", *step));
        for (field, value) in bounded.into_iter().chain(steps) {
            if value > MAX_INTERVAL_SECONDS {
                return Err(ConfigError::invalid(
                    field,
                    format!("must not exceed {} seconds", MAX_INTERVAL_SECONDS),
                ));
            }
        }

        let staleness = &self.staleness;
        if staleness.failure_threshold == 0 {
            return Err(ConfigError::invalid(
                "staleness.failure_threshold",
                "threshold must be at least 1",
            ));
        }
        if staleness.unchanged_threshold == 0 {
            return Err(ConfigError::invalid(
                "staleness.unchanged_threshold",
                "threshold must be at least 1",
            ));
        }
        if staleness.ttl_aggressive_seconds > staleness.ttl_seconds {
            return Err(ConfigError::invalid(
                "staleness.ttl_aggressive_seconds",
                "must not exceed ttl_seconds",
            ));
        }

        self.logging.validate()?;
        self.metrics_listen()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_trainboard_config_defaults() {
        let config = TrainboardConfig::default();
        assert_eq!(config.station, "HOB");
        assert_eq!(config.polling.baseline_seconds, 30);
        assert_eq!(config.staleness.failure_threshold, 3);
        assert_eq!(config.display.max_cards, 5);
        assert!(config.metrics.listen.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [feed]
        timeout_seconds = 3
        "#;

        let config: TrainboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.feed.timeout_seconds, 3);
        assert_eq!(config.feed.url, crate::feed::DEFAULT_FEED_URL); // Default
        assert_eq!(config.station, "HOB");
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../trainboard.example.toml");
        let config: TrainboardConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.polling.backoff_seconds, vec![5, 10, 20, 40, 60]);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "station = \"JSQ\"\n[staleness]\nttl_seconds = 60").unwrap();

        let config = TrainboardConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.station, "JSQ");
        assert_eq!(config.staleness.ttl_seconds, 60);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = TrainboardConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[polling\nbaseline_seconds = ").unwrap();

        let result = TrainboardConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_env_override_station() {
        std::env::set_var("TRAINBOARD_STATION", "NWK");
        let config = TrainboardConfig::default().with_env_overrides();
        std::env::remove_var("TRAINBOARD_STATION");

        assert_eq!(config.station, "NWK");
    }

    #[test]
    fn test_config_env_override_feed_url() {
        std::env::set_var("TRAINBOARD_FEED_URL", "http://127.0.0.1:9/feed.json");
        let config = TrainboardConfig::default().with_env_overrides();
        std::env::remove_var("TRAINBOARD_FEED_URL");

        assert_eq!(config.feed.url, "http://127.0.0.1:9/feed.json");
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        std::env::set_var("TRAINBOARD_FEED_TIMEOUT", "soon");
        let config = TrainboardConfig::default().with_env_overrides();
        std::env::remove_var("TRAINBOARD_FEED_TIMEOUT");

        // Should keep default, not crash
        assert_eq!(config.feed.timeout_seconds, 5);
    }

    #[test]
    fn test_config_env_override_log_level() {
        std::env::set_var("TRAINBOARD_LOG_LEVEL", "debug");
        let config = TrainboardConfig::default().with_env_overrides();
        std::env::remove_var("TRAINBOARD_LOG_LEVEL");

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_env_override_log_format() {
        std::env::set_var("TRAINBOARD_LOG_FORMAT", "json");
        let config = TrainboardConfig::default().with_env_overrides();
        assert_eq!(config.logging.format, LogFormat::Json);

        // Invalid format keeps default
        std::env::set_var("TRAINBOARD_LOG_FORMAT", "xml");
        let config = TrainboardConfig::default().with_env_overrides();
        std::env::remove_var("TRAINBOARD_LOG_FORMAT");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_validation_empty_station() {
        let config = TrainboardConfig {
            station: "  ".to_string(),
            ..Default::default()
        };

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "station"
        ));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = TrainboardConfig::default();
        config.feed.timeout_seconds = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "feed.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_jitter_range() {
        let mut config = TrainboardConfig::default();
        config.polling.jitter_ratio = 1.0;
        assert!(config.validate().is_err());

        config.polling.jitter_ratio = -0.1;
        assert!(config.validate().is_err());

        config.polling.jitter_ratio = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_backoff() {
        let mut config = TrainboardConfig::default();
        config.polling.backoff_seconds.clear();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "polling.backoff_seconds"
        ));
    }

    #[test]
    fn test_config_validation_inverted_thresholds() {
        let mut config = TrainboardConfig::default();
        config.polling.aggressive_threshold_seconds = 1000;
        config.polling.relaxed_threshold_seconds = 600;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_aggressive_ttl_above_ttl() {
        let mut config = TrainboardConfig::default();
        config.staleness.ttl_aggressive_seconds = 90;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "staleness.ttl_aggressive_seconds"
        ));
    }

    #[test]
    fn test_config_validation_rejects_oversized_intervals() {
        let mut config = TrainboardConfig::default();
        config.polling.background_seconds = u64::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "polling.background_seconds"
        ));

        let mut config = TrainboardConfig::default();
        config.polling.backoff_seconds = vec![5, MAX_INTERVAL_SECONDS + 1];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "polling.backoff_seconds"
        ));

        let mut config = TrainboardConfig::default();
        config.staleness.ttl_seconds = u64::MAX;
        assert!(config.validate().is_err());

        let mut config = TrainboardConfig::default();
        config.polling.relaxed_seconds = MAX_INTERVAL_SECONDS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_metrics_listen_parsing() {
        let mut config = TrainboardConfig::default();
        assert_eq!(config.metrics_listen().unwrap(), None);

        config.metrics.listen = Some("127.0.0.1:9464".to_string());
        assert_eq!(
            config.metrics_listen().unwrap(),
            Some("127.0.0.1:9464".parse().unwrap())
        );

        config.metrics.listen = Some("not an address".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = TrainboardConfig::load(None).unwrap();
        assert_eq!(config.station, "HOB");
        assert_eq!(config.feed.timeout_seconds, 5);
    }
}
