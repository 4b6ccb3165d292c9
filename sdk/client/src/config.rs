//! Client configuration and logger setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ContentAddress;

pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io/ipfs";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("max_payload_bytes must be greater than zero")]
    PayloadLimit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL records are linked under, without a trailing slash.
    pub gateway_url: String,
    pub log_level: String,
    pub max_payload_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading client config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("client config content: {content}");
        Self::from_toml_str(&content)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Gateway URL at which the payload behind `address` can be fetched.
    pub fn gateway_link(&self, address: &ContentAddress) -> String {
        format!("{}/{}", self.gateway_url.trim_end_matches('/'), address)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::PayloadLimit);
        }
        Ok(())
    }
}

/// Installs `env_logger` at the configured level. `RUST_LOG` still wins
/// when set. Repeated calls are ignored.
pub fn init_logging(config: &ClientConfig) -> Result<(), ConfigError> {
    let level = config.level_filter()?;
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .is_test(cfg!(test))
        .try_init();
    Ok(())
}
