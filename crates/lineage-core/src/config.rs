use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning for lineage traversals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Deadline for a whole top-level call. Expiry surfaces as `Cancelled`.
    pub query_timeout_ms: Option<u64>,
    /// Maximum ledger fetches in flight per traversal level.
    pub max_concurrency: usize,
    /// Report nodes whose reported generation disagrees with their parents.
    pub check_generations: bool,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: None,
            max_concurrency: 8,
            check_generations: true,
        }
    }
}

impl LineageConfig {
    /// One fetch at a time.
    pub fn sequential() -> Self {
        Self {
            max_concurrency: 1,
            ..Self::default()
        }
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::Invalid("max_concurrency must be at least 1".into()));
        }
        if self.query_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("query_timeout_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }
}
