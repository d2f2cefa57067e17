//! Configuration settings for stratmarket.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides, e.g. `STRATMARKET__STORAGE__KEY`.
const ENV_PREFIX: &str = "STRATMARKET";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistence configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, layered under environment overrides.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_config_path);

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path.as_path()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::Error::config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_config_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Whether preferences survive restarts. When false an in-memory backend is used.
    pub enabled: bool,
    /// Storage key of the persisted record.
    pub key: String,
    /// Directory holding persisted records. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: crate::storage::DEFAULT_STORAGE_KEY.to_string(),
            directory: None,
        }
    }
}

impl StorageConfig {
    /// Resolve the storage directory.
    pub fn resolve_directory(&self) -> crate::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => super::data_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub filter: String,
    /// Also write logs to a daily rolling file.
    pub file: bool,
    /// Log directory. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "stratmarket=info".to_string(),
            file: true,
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Resolve the log directory.
    pub fn resolve_directory(&self) -> crate::Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => super::log_dir(),
        }
    }
}
