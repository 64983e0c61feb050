//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_NAME, DEFAULT_DOUBLE_TAP_MS, DEFAULT_TITLE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest double-tap window accepted, in milliseconds.
const MAX_TIMING_MS: u32 = 5_000;

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Title written into the document
    pub title: String,
    /// Default output file; stdout when unset
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            path: None,
        }
    }
}

/// Timing applied to activation rules.
///
/// Values are copied into each rule that needs them; the engine has no global
/// timing in the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Window for the second tap of a double-tap latch
    pub double_tap_ms: u32,
    /// Tap window for dual-role keys (engine default when unset)
    pub tap_timeout_ms: Option<u32>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            double_tap_ms: DEFAULT_DOUBLE_TAP_MS,
            tap_timeout_ms: None,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LazyKarabiner/config.toml`
/// - macOS: `~/Library/Application Support/LazyKarabiner/config.toml`
/// - Windows: `%APPDATA%\LazyKarabiner\config.toml`
///
/// # Validation
///
/// - `title` must not be blank
/// - `double_tap_ms` must be between 1 and 5000
/// - `tap_timeout_ms`, when set, must be between 1 and 5000
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Output document settings
    pub output: OutputConfig,
    /// Activation timing
    pub timing: TimingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }
        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Saves configuration to `path` atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.output.title.trim().is_empty() {
            anyhow::bail!("Output title must not be empty");
        }

        if self.timing.double_tap_ms == 0 || self.timing.double_tap_ms > MAX_TIMING_MS {
            anyhow::bail!(
                "double_tap_ms must be between 1 and {MAX_TIMING_MS}, got {}",
                self.timing.double_tap_ms
            );
        }

        if let Some(timeout) = self.timing.tap_timeout_ms {
            if timeout == 0 || timeout > MAX_TIMING_MS {
                anyhow::bail!(
                    "tap_timeout_ms must be between 1 and {MAX_TIMING_MS}, got {timeout}"
                );
            }
        }

        Ok(())
    }
}
