//! Loading `sitesift` TOML configuration files
//!
//! A file is read once; the same bytes are parsed, validated and hashed, so the
//! hash logged at startup always describes the settings actually in force.
//! Every section and key is optional and falls back to its default.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates the configuration file at `path`
///
/// # Errors
///
/// * `ConfigError::Io` if the file cannot be read
/// * `ConfigError::Parse` if it is not valid TOML for [`Config`]
/// * `ConfigError::Validation` / `ConfigError::InvalidUrl` if a value is out of range
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Computes the SHA-256 hex digest of the file at `path`
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Loads a configuration together with the hash of the bytes it was parsed from
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
