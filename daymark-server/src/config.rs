//! Serializable server configuration.

use daymark_core::data::provider::DEFAULT_FEED_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the daymark server and CLI.
///
/// All fields have defaults; a missing config file is not an error for
/// callers that use [`ServerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory holding the cache artifact and its sidecar. Created
    /// idempotently at startup.
    pub data_dir: PathBuf,

    /// Feed URL template with a `{year}` placeholder.
    pub feed_url: String,

    /// Deadline for a single feed request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("holiday_data"),
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
