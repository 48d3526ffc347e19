//! Application configuration.

use crate::error::{AppError, AppResult};
use dedup_broker::BrokerConfig;
use dedup_detector::{DetectorConfig, SelectorConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Broker endpoint configuration.
    #[serde(default)]
    pub broker: BrokerConfig,
    /// Conflict detection configuration.
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Closure selection configuration.
    #[serde(default)]
    pub selector: SelectorConfig,
    /// Closed-trade history lookback in days. Default: 1.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

fn default_lookback_days() -> u32 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            detector: DetectorConfig::default(),
            selector: SelectorConfig::default(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl AppConfig {
    /// Load from a file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(config_path: &str) -> AppResult<Self> {
        if Path::new(config_path).exists() {
            Self::from_file(config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration.
    pub fn validate(&self) -> AppResult<()> {
        self.detector.validate()?;
        if self.lookback_days == 0 {
            return Err(AppError::Config(
                "lookback_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lookback_days, 1);
        assert!(config.broker.demo);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            lookback_days = 2

            [broker]
            demo = false
            status_epic = "IX.D.NASDAQ.IFS.IP"
            timeout_secs = 5

            [detector]
            window_ms = 43200000
            require_opened_after = true

            [selector]
            excluded_instruments = ["Apple Inc (All Sessions)", "EU Stocks 50", "EUR/USD"]
        "#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.broker.demo);
        assert_eq!(config.detector.window_ms, 43_200_000);
        assert_eq!(config.selector.excluded_instruments.len(), 3);
        assert_eq!(config.lookback_days, 2);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("[broker]\ndemo = true\n").unwrap();
        assert_eq!(config.detector.window_ms, 86_400_000);
        assert!(config.selector.excluded_instruments.is_empty());
    }

    #[test]
    fn test_invalid_window_rejected() {
        let config: AppConfig = toml::from_str("[detector]\nwindow_ms = -1\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let config: AppConfig = toml::from_str("lookback_days = 0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
