//! Broker configuration.

use serde::{Deserialize, Serialize};

/// IG demo endpoint.
pub const DEMO_BASE_URL: &str = "https://demo-api.ig.com/gateway/deal";
/// IG live endpoint.
pub const LIVE_BASE_URL: &str = "https://api.ig.com/gateway/deal";

/// Configuration for the IG REST client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Use the demo account endpoint. Default: true.
    #[serde(default = "default_demo")]
    pub demo: bool,
    /// Epic whose market status gates the whole run (the reference
    /// market; the run is skipped while it is in EDITS_ONLY).
    /// Default: US Tech 100 futures.
    #[serde(default = "default_status_epic")]
    pub status_epic: String,
    /// Request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_demo() -> bool {
    true
}

fn default_status_epic() -> String {
    "IX.D.NASDAQ.IFS.IP".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            demo: default_demo(),
            status_epic: default_status_epic(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BrokerConfig {
    /// Base URL for the configured account type.
    pub fn base_url(&self) -> &'static str {
        if self.demo {
            DEMO_BASE_URL
        } else {
            LIVE_BASE_URL
        }
    }
}
