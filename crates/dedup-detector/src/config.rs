//! Detector and selector configuration.

use crate::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default proximity window: 24 hours in milliseconds.
pub const DEFAULT_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Configuration for conflict detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Symmetric proximity window in milliseconds. Two positions opened
    /// within this window of each other conflict. Default: 24 hours.
    #[serde(default = "default_window_ms")]
    pub window_ms: i64,
    /// Only count an open position against a closed trade when the
    /// position was created strictly after the closed trade was opened.
    /// Default: true.
    #[serde(default = "default_require_opened_after")]
    pub require_opened_after: bool,
}

fn default_window_ms() -> i64 {
    DEFAULT_WINDOW_MS
}

fn default_require_opened_after() -> bool {
    true
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            require_opened_after: default_require_opened_after(),
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> DetectorResult<()> {
        if self.window_ms <= 0 {
            return Err(DetectorError::InvalidConfig(format!(
                "window_ms ({}) must be positive",
                self.window_ms
            )));
        }
        Ok(())
    }
}

/// Configuration for closure selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Instruments exempt from closure. Conflicts on these instruments
    /// are detected but never acted on. Default: empty.
    #[serde(default)]
    pub excluded_instruments: HashSet<String>,
}

impl SelectorConfig {
    /// Check if an instrument is exempt from closure.
    pub fn is_excluded(&self, instrument: &str) -> bool {
        self.excluded_instruments.contains(instrument)
    }
}
