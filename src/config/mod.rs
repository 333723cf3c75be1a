use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::DEFAULT_STORE_FILE;

/// Environment variable consulted for the remote credential when the
/// config file carries none
pub const API_KEY_ENV: &str = "STOCKROOM_API_KEY";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config validation failed: {message}")]
    Validation { message: String },
}

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// Log file path, if not set, logs will be printed to stdout
    pub file: Option<PathBuf>,
    /// Log level, default is "info"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: default_log_level(),
        }
    }
}

/// Which persistence backend the inventory runs against
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Single JSON blob on the local filesystem
    Local {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    /// Hosted document store, one record per item
    Remote(RemoteConfig),
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_FILE)
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Local {
            path: default_store_path(),
        }
    }
}

/// Connection settings for the remote document store
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RemoteConfig {
    /// Service base URL
    pub base_url: String,
    /// Project identifier at the hosting service
    pub project_id: String,
    /// Collection holding the inventory records
    #[serde(default = "default_collection")]
    pub collection: String,
    /// API credential; when unset, `STOCKROOM_API_KEY` is consulted
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_collection() -> String {
    "inventory".to_string()
}

impl RemoteConfig {
    /// Credential from the config file, or from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}

/// Top-level configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    /// Persistence backend selection and settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults (local backend, stdout logging
    /// at "info"); an unreadable or invalid file is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the settings serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let BackendConfig::Remote(remote) = &self.backend {
            if remote.base_url.is_empty() {
                return Err(ConfigError::Validation {
                    message: "remote backend requires a base_url".to_string(),
                });
            }
            if remote.project_id.is_empty() {
                return Err(ConfigError::Validation {
                    message: "remote backend requires a project_id".to_string(),
                });
            }
        }
        Ok(())
    }
}
