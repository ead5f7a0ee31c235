//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::reader::ConfigError;
use crate::config::tree::ConfigTree;
use crate::config::value::ConfigValue;
use crate::options::ServerSettings;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot tell config format of {0}, expected a .toml or .json file")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Config file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Parse config text into a tree.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<ConfigTree, LoadError> {
    let tree = match format {
        ConfigFormat::Toml => {
            let table: toml::Table = toml::from_str(content)?;
            ConfigTree::from_value(ConfigValue::from_toml(toml::Value::Table(table)))?
        }
        ConfigFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)?;
            ConfigTree::from_json(value)?
        }
    };
    Ok(tree)
}

/// Load a config file. Without an explicit format the extension decides.
pub fn load_config(path: &Path, format: Option<ConfigFormat>) -> Result<ConfigTree, LoadError> {
    let format = format
        .or_else(|| ConfigFormat::from_path(path))
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = parse_config(&content, format)?;
    tracing::debug!(path = ?path, ?format, "Config file parsed");
    Ok(tree)
}

/// Load a config file and extract all server settings from it.
pub fn load_settings(
    path: &Path,
    format: Option<ConfigFormat>,
) -> Result<ServerSettings, LoadError> {
    let tree = load_config(path, format)?;
    Ok(ServerSettings::from_reader(&tree)?)
}
