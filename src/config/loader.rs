//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::parse;
use crate::config::schema::AdapterConfig;

/// Error type for configuration loading.
///
/// Only reading and TOML syntax can fail; the contents are mapped leniently.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Parse TOML text into a configuration.
pub fn parse_toml(content: &str) -> Result<AdapterConfig, ConfigError> {
    let tree: serde_json::Value = toml::from_str(content)?;
    Ok(parse::adapter_config(&tree))
}
