//! Configuration management.
//!
//! Handles:
//! - Default length class for minted identifiers
//! - Default output format
//! - Log level
//!
//! Precedence is flag, then environment, then `config.json`, then built-in
//! defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use hailstone::LengthClass;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Environment override for the default length class.
pub const LENGTH_ENV: &str = "HAILSTONE_LENGTH";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("io", "hailstone", "hail")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Length class used by `hail create` when `--length` is omitted.
    #[serde(default)]
    pub length: LengthClass,

    /// Output format used when `--format` is omitted.
    #[serde(default = "default_format")]
    pub format: String,

    /// Tracing filter used when neither `RUST_LOG` nor `HAILSTONE_LOG_LEVEL` is set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_format() -> String {
    "table".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length: LengthClass::default(),
            format: default_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILE);
        let config = Self::load_from(&path)?;
        config.with_env_overrides()
    }

    /// Load config from a specific file, or return default if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Apply environment overrides.
    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(value) = std::env::var(LENGTH_ENV) {
            self.length = value
                .parse()
                .with_context(|| format!("Invalid {LENGTH_ENV} value {value:?}"))?;
        }
        Ok(self)
    }

    /// Path of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join(CONFIG_FILE))
    }

    /// Save config to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))
    }
}
