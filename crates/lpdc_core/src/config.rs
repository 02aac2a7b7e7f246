//! Runtime configuration of the core.
//!
//! Values come from defaults, a serialized document, or `LPDC_*` environment
//! variables.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "LPDC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LPDC_LOG_DIR";
pub const ENV_DATABASE_PATH: &str = "LPDC_DATABASE_PATH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "LPDC_BUSY_TIMEOUT_MS";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: String, value: String },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "`{key}` should be a non-negative integer, got `{value}`")
            }
            Self::InvalidLogLevel(level) => write!(f, "unsupported log level `{level}`"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub log_level: String,
    /// No file logging when absent.
    pub log_dir: Option<PathBuf>,
    /// In-memory database when absent.
    pub database_path: Option<PathBuf>,
    pub busy_timeout_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            database_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level)
                .map_err(|_| ConfigError::InvalidLogLevel(level.clone()))?
                .to_string();
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = value(ENV_DATABASE_PATH) {
            config.database_path = Some(PathBuf::from(path));
        }
        if let Some(timeout) = value(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: ENV_BUSY_TIMEOUT_MS.to_string(),
                        value: timeout.clone(),
                    })?;
        }
        Ok(config)
    }
}
