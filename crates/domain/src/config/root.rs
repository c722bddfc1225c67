use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::feeds::FeedsConfig;
use super::logging::LoggingConfig;
use crate::validators;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub feeds: FeedsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub query_timeout: Option<u64>,
    pub max_concurrent_lookups: Option<usize>,
    pub cache_file: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `config_path` (defaults when `None`) and apply CLI overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.query_timeout {
            self.dns.query_timeout = timeout;
        }
        if let Some(limit) = overrides.max_concurrent_lookups {
            self.dns.max_concurrent_lookups = limit;
        }
        if let Some(cache_file) = overrides.cache_file {
            self.feeds.cache_file = cache_file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "dns.query_timeout must be greater than 0".to_string(),
            ));
        }
        if self.dns.port == 0 {
            return Err(ConfigError::Validation(
                "dns.port must be greater than 0".to_string(),
            ));
        }
        if self.feeds.fetch_timeout == 0 {
            return Err(ConfigError::Validation(
                "feeds.fetch_timeout must be greater than 0".to_string(),
            ));
        }
        if self.feeds.cache_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feeds.cache_file cannot be empty".to_string(),
            ));
        }
        if self.feeds.sources.is_empty() {
            return Err(ConfigError::Validation(
                "at least one feed source must be configured".to_string(),
            ));
        }
        for source in &self.feeds.sources {
            validators::validate_provider_name(&source.provider)
                .and_then(|_| validators::validate_url(&source.url))
                .map_err(|e| {
                    ConfigError::Validation(format!("feed source '{}': {}", source.provider, e))
                })?;
        }
        Ok(())
    }
}
