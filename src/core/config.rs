//! Configuration management for viewstate.
//!
//! This module provides configuration handling with:
//! - YAML file support
//! - Programmatic builder overrides
//! - Validation and defaults

use crate::core::{Result, ViewStateError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete configuration for the state model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parameter codec/store configuration
    pub params: ParamsConfig,
    /// Preference synchronizer configuration
    pub prefs: PrefsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Parameter codec and store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Maximum accepted size of an encoded parameter token in bytes.
    /// Oversized tokens are treated as malformed and decode to defaults.
    pub max_token_bytes: usize,
    /// Remove flat keys from the URL when set to an empty value
    pub drop_empty_params: bool,
}

/// Preference synchronizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsConfig {
    /// Timeout for a single remote save
    #[serde(with = "humantime_serde")]
    pub save_timeout: Duration,
    /// Timeout for the initial preference load
    #[serde(with = "humantime_serde")]
    pub load_timeout: Duration,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
}

/// Log levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            params: ParamsConfig::default(),
            prefs: PrefsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ParamsConfig {
    fn default() -> Self {
        ParamsConfig {
            max_token_bytes: 8 * 1024,
            drop_empty_params: true,
        }
    }
}

impl Default for PrefsConfig {
    fn default() -> Self {
        PrefsConfig {
            save_timeout: Duration::from_secs(10),
            load_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.params.max_token_bytes < 256 {
            return Err(ViewStateError::config(format!(
                "max_token_bytes must be at least 256, got {}",
                self.params.max_token_bytes
            )));
        }

        if self.prefs.save_timeout.is_zero() {
            return Err(ViewStateError::config("save_timeout must be greater than 0"));
        }

        if self.prefs.load_timeout.is_zero() {
            return Err(ViewStateError::config("load_timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
        }
    }

    /// Load configuration from YAML string
    pub fn from_yaml(mut self, yaml: &str) -> Result<Self> {
        self.config = serde_yaml::from_str(yaml)
            .map_err(|e| ViewStateError::config(format!("Failed to parse YAML config: {}", e)))?;
        Ok(self)
    }

    /// Set maximum encoded token size
    pub fn max_token_bytes(mut self, bytes: usize) -> Self {
        self.config.params.max_token_bytes = bytes;
        self
    }

    /// Set whether empty flat params are dropped from the URL
    pub fn drop_empty_params(mut self, drop: bool) -> Self {
        self.config.params.drop_empty_params = drop;
        self
    }

    /// Set remote save timeout
    pub fn save_timeout(mut self, timeout: Duration) -> Self {
        self.config.prefs.save_timeout = timeout;
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Build and validate the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.params.max_token_bytes, 8 * 1024);
        assert!(config.params.drop_empty_params);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .max_token_bytes(4096)
            .drop_empty_params(false)
            .save_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.params.max_token_bytes, 4096);
        assert!(!config.params.drop_empty_params);
        assert_eq!(config.prefs.save_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_tiny_token_limit_rejected() {
        let result = ConfigBuilder::new().max_token_bytes(16).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
params:
  max_token_bytes: 2048
  drop_empty_params: true
prefs:
  save_timeout: 3s
  load_timeout: 5s
logging:
  level: debug
"#;
        let config = ConfigBuilder::new().from_yaml(yaml).unwrap().build().unwrap();
        assert_eq!(config.params.max_token_bytes, 2048);
        assert_eq!(config.prefs.save_timeout, Duration::from_secs(3));
        assert_eq!(config.logging.level.as_str(), "debug");
    }
}
