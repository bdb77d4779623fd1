mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::autosave::DEFAULT_AUTOSAVE_DELAY;

/// Get the config directory path (~/.config/multi-smackdown/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("multi-smackdown")
}

/// Get the default config file path (~/.config/multi-smackdown/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path,
///   and a missing default file means all defaults.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    // An empty file is a valid "all defaults" config
    if config_content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), units = ?config.units, "loaded config");
    Ok(config)
}

impl Config {
    /// Data directory, with a leading `~` expanded
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => expand_home(dir),
            None => get_config_dir(),
        }
    }

    /// Parsed autosave delay; call [`validate_config`] first to surface bad
    /// values, this falls back to the default.
    pub fn autosave_delay(&self) -> Duration {
        self.autosave_delay
            .as_deref()
            .and_then(|s| humantime::parse_duration(s.trim()).ok())
            .unwrap_or(DEFAULT_AUTOSAVE_DELAY)
    }

    /// Scoring table path, with a leading `~` expanded
    pub fn scoring_table_path(&self) -> Option<PathBuf> {
        self.scoring_table.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref delay) = config.autosave_delay {
        if let Err(e) = humantime::parse_duration(delay.trim()) {
            errors.push(format!("autosave_delay: invalid duration '{}' - {}", delay, e));
        }
    }

    if let Some(path) = config.scoring_table_path() {
        if !path.is_file() {
            errors.push(format!("scoring_table: no file at {}", path.display()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
