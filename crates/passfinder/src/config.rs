//! Configuration file support for passfinder.
//!
//! Loads `passfinder.toml` from the working directory, falling back to
//! `<config dir>/passfinder/config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use passfinder_db::{StoreConfig, DEFAULT_DB_FILE, DEFAULT_TABLE};

/// Configuration loaded from `passfinder.toml`
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Path to the facilities database. Relative paths resolve against
    /// the working directory.
    pub db_path: Option<PathBuf>,
    /// Facilities table name
    pub table: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "passfinder.toml";

impl ProjectConfig {
    /// Load configuration from the working directory, then the user
    /// config directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a file exists and parses successfully
    /// - `Ok(None)` if no file exists
    /// - `Err(...)` if a file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        if let Some(config) = Self::load_from(&working_dir.join(CONFIG_FILE_NAME))? {
            return Ok(Some(config));
        }

        match dirs::config_dir() {
            Some(dir) => Self::load_from(&dir.join("passfinder").join("config.toml")),
            None => Ok(None),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}

/// Command-line overrides for the store location
#[derive(Debug, Default)]
pub struct StoreOverrides {
    pub db_path: Option<PathBuf>,
    pub table: Option<String>,
}

/// Build the store config.
/// Priority: CLI flag > config file > default
pub fn resolve_store_config(
    overrides: StoreOverrides,
    config: Option<&ProjectConfig>,
    working_dir: &Path,
    exe_dir: Option<&Path>,
) -> StoreConfig {
    let db_path = overrides
        .db_path
        .or_else(|| config.and_then(|c| c.db_path.clone()))
        .map(|path| working_dir.join(path))
        .unwrap_or_else(|| default_store_path(working_dir, exe_dir));

    let table = overrides
        .table
        .or_else(|| config.and_then(|c| c.table.clone()))
        .unwrap_or_else(|| DEFAULT_TABLE.to_string());

    StoreConfig::new(db_path).with_table(table)
}

/// The store lives next to the application: prefer the executable's
/// directory, then the working directory.
fn default_store_path(working_dir: &Path, exe_dir: Option<&Path>) -> PathBuf {
    let fallback = working_dir.join(DEFAULT_DB_FILE);

    exe_dir
        .map(|dir| dir.join(DEFAULT_DB_FILE))
        .into_iter()
        .chain(std::iter::once(fallback.clone()))
        .find(|candidate| candidate.exists())
        .unwrap_or(fallback)
}
