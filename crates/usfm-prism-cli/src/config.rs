//! Optional TOML configuration for conversion defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use usfm_prism_engine::{Format, UnsupportedFormat};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target format used when neither `--to` nor the output extension
    /// names one. `usj` when unset.
    pub default_output: Option<String>,
    /// Pretty-print USJ output by default.
    pub pretty: bool,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/usfm-prism");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured fallback output format.
    pub fn default_output(&self) -> Result<Format, UnsupportedFormat> {
        match self.default_output.as_deref() {
            Some(name) => Format::from_str(name),
            None => Ok(Format::Usj),
        }
    }
}
