//! Configuration management for sitegrab.
//!
//! Configuration is read from `~/.config/sitegrab/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::engine::{RelayStrategy, DEFAULT_WORKERS};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub engine: EngineConfig,
    /// Replaces the built-in relay chain when present, in priority order
    pub relays: Option<Vec<RelayStrategy>>,
}

/// Transport settings for relay requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request deadline in seconds; 0 disables it
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            user_agent: format!("sitegrab/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Concurrent scans when several URLs are given
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
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

    /// Get the default config file path: `~/.config/sitegrab/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("sitegrab").join("config.toml"))
    }

    /// The relay chain to run, in priority order.
    pub fn relays(&self) -> Vec<RelayStrategy> {
        self.relays.clone().unwrap_or_else(RelayStrategy::defaults)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(relays) = &self.relays {
            if relays.is_empty() {
                return Err(ConfigError::Relay(
                    "at least one [[relays]] entry is required".into(),
                ));
            }
            for relay in relays {
                relay.validate()?;
            }
        }
        Ok(())
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# sitegrab configuration

[http]
# Deadline for each relay request in seconds. 0 waits indefinitely.
timeout_secs = 20

# User agent sent to the relays
# user_agent = "sitegrab/0.1.0"

[engine]
# Concurrent scans when several URLs are given on the command line
workers = 4

# Relays are tried top to bottom until one returns the page.
# Uncomment to replace the built-in chain. `{url}` receives the
# query-encoded target URL.
#
# [[relays]]
# name = "allorigins"
# label = "Primary Proxy (JSON)"
# template = "https://api.allorigins.win/get?url={url}"
# decoding = { kind = "json-envelope", field = "contents" }
#
# [[relays]]
# name = "codetabs"
# label = "Secondary Proxy"
# template = "https://api.codetabs.com/v1/proxy?quest={url}"
# decoding = { kind = "passthrough" }
#
# [[relays]]
# name = "corsproxy"
# label = "Tertiary Proxy"
# template = "https://corsproxy.io/?{url}"
# decoding = { kind = "passthrough" }
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid relay definition: {0}")]
    Relay(String),
}
