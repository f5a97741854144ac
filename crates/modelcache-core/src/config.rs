//! Configuration types for modelcache

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Client configuration file format (TOML)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Model cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, crate::ModelCacheError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, crate::ModelCacheError> {
        Ok(toml::from_str(content)?)
    }
}

/// Model cache configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Try constructing a model again on the next request after it failed once
    #[serde(default)]
    pub retry_failed: bool,
    /// Model names resolved right after the cache is created
    #[serde(default)]
    pub preload: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
