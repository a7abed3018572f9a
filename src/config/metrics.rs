//! Metrics exporter configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Address for the Prometheus scrape listener, e.g. "127.0.0.1:9464".
    /// Metrics are not exported when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
}
