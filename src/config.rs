use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::roster::{DEFAULT_CAPACITY, SeedPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub storage_path: PathBuf,
    pub autosave_interval_secs: u64,
    pub shutdown_join_timeout_secs: u64,
    pub capacity: usize,
    pub seed: SeedPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("roster.csv"),
            autosave_interval_secs: 60,
            shutdown_join_timeout_secs: 5,
            capacity: DEFAULT_CAPACITY,
            seed: SeedPolicy::Demo,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autosave_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "autosave_interval_secs must be > 0".to_string(),
            ));
        }
        if self.shutdown_join_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "shutdown_join_timeout_secs must be > 0".to_string(),
            ));
        }
        if self.capacity == 0 || self.capacity > DEFAULT_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "capacity must be between 1 and {DEFAULT_CAPACITY}"
            )));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("storage_path is empty".to_string()));
        }
        Ok(())
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    pub fn shutdown_join_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_join_timeout_secs)
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
