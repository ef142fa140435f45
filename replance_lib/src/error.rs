//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding configuration and input validation failures.
#[derive(Debug)]
pub enum ReplanceError {
    /// An error from the underlying API client.
    Api(replance_api::Error),
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for ReplanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ReplanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<replance_api::Error> for ReplanceError {
    fn from(e: replance_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ConfigError> for ReplanceError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
