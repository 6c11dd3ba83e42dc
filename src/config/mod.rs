//! Configuration file support for pngclip.
//!
//! Settings are read from `~/.config/pngclip/config.toml`. If no config file exists,
//! defaults are used.

pub mod types;

pub use types::{ClipboardConfig, OutputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_TIMEOUT_MS: u64 = 100;
const MAX_TIMEOUT_MS: u64 = 60_000;

/// Main configuration structure.
///
/// # Example TOML
/// ```toml
/// [clipboard]
/// timeout_ms = 5000
///
/// [output]
/// save_directory = "~/Pictures/pngclip"
/// filename_template = "pngclip_%Y-%m-%d_%H%M%S"
/// fallback_to_file = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Clipboard tool timeout
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// Disk-save fallback
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Clamps out-of-range values and resets unusable ones, logging a warning for each.
    ///
    /// Runs on load; call again after applying command-line overrides.
    pub fn validate_and_clamp(&mut self) {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.clipboard.timeout_ms) {
            log::warn!(
                "Invalid clipboard timeout_ms {}, clamping to {}-{} range",
                self.clipboard.timeout_ms,
                MIN_TIMEOUT_MS,
                MAX_TIMEOUT_MS
            );
            self.clipboard.timeout_ms = self
                .clipboard
                .timeout_ms
                .clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        }

        if self.output.filename_template.trim().is_empty() {
            log::warn!("Empty output filename_template, falling back to default");
            self.output.filename_template = OutputConfig::default().filename_template;
        }

        if self.output.save_directory.trim().is_empty() {
            log::warn!("Empty output save_directory, falling back to default");
            self.output.save_directory = OutputConfig::default().save_directory;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.clipboard.timeout_ms)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pngclip");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}
