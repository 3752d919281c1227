// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{OrchestratorError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest, prefix `WAYFARER_`, `__` between sections)
    /// 2. Config file (explicit path, otherwise `~/.wayfarer/config.toml` if present)
    /// 3. Defaults (lowest)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("WAYFARER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| OrchestratorError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| OrchestratorError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wayfarer")
            .join("config.toml")
    }
}
