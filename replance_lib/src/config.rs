//! Client configuration: backend location, poll period and request timeout.
//!
//! Layers, lowest precedence first: built-in defaults, an optional TOML file,
//! `REPLANCE_*` environment variables, then whatever the caller overrides
//! (the CLI applies its flags last).

use std::path::{Path, PathBuf};
use std::time::Duration;

use replance_api::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::error::ReplanceError;

/// Period between demo pipeline runs.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub const ENV_BASE_URL: &str = "REPLANCE_BASE_URL";
pub const ENV_POLL_SECS: &str = "REPLANCE_POLL_SECS";
pub const ENV_TIMEOUT_SECS: &str = "REPLANCE_TIMEOUT_SECS";

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// On-disk shape. Every key is optional.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    poll_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Loads defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                        path: path.to_path_buf(),
                        source,
                    })?;
                tracing::debug!("Loaded config file {}", path.display());
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document over the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        if let Some(secs) = file.poll_interval_secs {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = file.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Applies `REPLANCE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(secs) = env_secs(&lookup, ENV_POLL_SECS)? {
            self.poll_interval = secs;
        }
        if let Some(secs) = env_secs(&lookup, ENV_TIMEOUT_SECS)? {
            self.request_timeout = secs;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".into(),
            message: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "base_url".into(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "poll_interval".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Builds an API client for the configured backend.
    pub fn client(&self) -> Result<Client, ReplanceError> {
        Ok(Client::with_timeout(&self.base_url, self.request_timeout)?)
    }
}

fn env_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(val) => val
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("'{}': {}", val, e),
            }),
    }
}
