//! `[logging]` section: verbosity and output format of the poller's events.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// How poll and transition events are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, human-readable
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::invalid(
                "logging.format",
                format!("expected \"pretty\" or \"json\", got {:?}", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every module
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels under `trainboard::`, e.g. {"scheduler": "debug"}
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<BTreeMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject levels `tracing` would not understand, so a typo fails at
    /// startup instead of silently logging at the default level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LevelFilter::from_str(&self.level).is_err() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level {:?}", self.level),
            ));
        }

        for (component, level) in self.component_levels.iter().flatten() {
            if LevelFilter::from_str(level).is_err() {
                return Err(ConfigError::invalid(
                    &format!("logging.component_levels.{}", component),
                    format!("unknown level {:?}", level),
                ));
            }
        }

        Ok(())
    }
}
