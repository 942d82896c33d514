//! Configuration file support for apk-sbom.
//!
//! Provides YAML-based configuration through `apk-sbom.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::process::ExecutorConfig;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "apk-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Root-relative location of the os-release file
    pub os_release_path: Option<PathBuf>,
    /// Root-relative location of the installed-package database
    pub installed_db_path: Option<PathBuf>,
    /// File the JSON model is written to instead of stdout
    pub output: Option<PathBuf>,
    pub executor: Option<ExecutorConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    tracing::debug!("Using config file {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (key, value) in [
        ("os_release_path", &config.os_release_path),
        ("installed_db_path", &config.installed_db_path),
        ("output", &config.output),
    ] {
        if value.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n\
                 💡 Hint: Remove the key to use the default location.",
                key
            );
        }
    }

    if let Some(arch) = config
        .executor
        .as_ref()
        .and_then(|e| e.emulated_arch.as_deref())
    {
        if arch.trim().is_empty() {
            bail!(
                "Invalid config: executor.emulated_arch must not be empty.\n\n\
                 💡 Hint: Name a target architecture (e.g., \"aarch64\") or remove the key."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}
