//! Run configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `PARKING_*` environment variables. CLI flags are applied on top
//! by the binary.

use crate::error::{Error, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix (`PARKING_OUTPUT=json`, ...)
pub const ENV_PREFIX: &str = "PARKING";

/// How command outcomes are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable messages
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Outcome rendering
    pub output: OutputFormat,
    /// Stop when the first command of the stream is not `Create_parking_lot`
    pub require_create_first: bool,
    /// Stop at the first failed command
    pub stop_on_error: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Directory for rolling log files; console only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    /// Disable colored log output
    pub no_color: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            require_create_first: true,
            stop_on_error: false,
            log_level: "warn".to_string(),
            log_dir: None,
            no_color: false,
        }
    }
}

impl RunConfig {
    /// Load defaults, then `path` (if any), then `PARKING_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!(path = ?path, "Loading configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
