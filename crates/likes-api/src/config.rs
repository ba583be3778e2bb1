//! # Service Configuration
//!
//! [`AppConfig`] is read once at startup from an optional YAML file and then
//! patched from `LIKES_*` environment variables. Every field has a default,
//! so an empty file (or no file) yields a runnable configuration.
//!
//! ```yaml
//! port: 8080
//! min_voters_chunk: 10
//! batch_time_minutes: 30
//! log_format: json
//! metrics_enabled: true
//! fixture: ./dev/fixture.yaml
//! verbs:
//!   photo_like: liked the picture
//! ```
//!
//! | Variable                | Field              |
//! |-------------------------|--------------------|
//! | `LIKES_CONFIG`          | path of the file   |
//! | `LIKES_PORT`            | `port`             |
//! | `LIKES_MIN_VOTERS_CHUNK`| `min_voters_chunk` |
//! | `LIKES_METRICS_ENABLED` | `metrics_enabled`  |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use likes_core::{Batching, VerbTable};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "LIKES_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Format(String),

    #[error("invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Log output format for the binaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration of the API service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Size of the first page of an incremental voter listing.
    pub min_voters_chunk: usize,
    /// Batching window attached to activity entries sent by likes.
    pub batch_time_minutes: u32,
    pub log_format: LogFormat,
    /// Mount `/metrics` and record request metrics.
    pub metrics_enabled: bool,
    /// Verb overrides; keys left out keep their default verb.
    pub verbs: VerbTable,
    /// YAML seed file for the in-memory stores.
    pub fixture: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            min_voters_chunk: 10,
            batch_time_minutes: 30,
            log_format: LogFormat::Text,
            metrics_enabled: true,
            verbs: VerbTable::defaults(),
            fixture: None,
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Format(e.to_string()))
    }

    /// Read and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` (or `$LIKES_CONFIG`, or defaults) and apply the
    /// process environment.
    pub fn from_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::load(&p)?,
            None => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `LIKES_*` overrides read through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("LIKES_PORT") {
            self.port = v.parse().map_err(|_| ConfigError::Env {
                var: "LIKES_PORT",
                value: v,
            })?;
        }
        if let Some(v) = lookup("LIKES_MIN_VOTERS_CHUNK") {
            self.min_voters_chunk = v.parse().map_err(|_| ConfigError::Env {
                var: "LIKES_MIN_VOTERS_CHUNK",
                value: v,
            })?;
        }
        if let Some(v) = lookup("LIKES_METRICS_ENABLED") {
            self.metrics_enabled = v.to_lowercase() != "false";
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_voters_chunk == 0 {
            return Err(ConfigError::Invalid(
                "min_voters_chunk must be at least 1".to_string(),
            ));
        }
        self.verbs
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn batching(&self) -> Batching {
        Batching {
            batch_time_minutes: self.batch_time_minutes,
            is_batchable: true,
        }
    }
}
