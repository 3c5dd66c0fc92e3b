//! Configuration for ScaleMark
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - UI preferences (theme, stage size, prompt hint)
//! - Export defaults (file name, border)
//! - Recently opened backgrounds

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use scalemark_core::constants::{DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};
pub use scalemark_core::Theme;

use crate::error::{SettingsError, SettingsResult};

/// Maximum number of recent files remembered.
pub const MAX_RECENT_FILES: usize = 10;

/// UI preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Selected theme (light/dark)
    #[serde(default)]
    pub theme: Theme,
    /// Width of the stage the background is fitted into
    pub stage_width: f64,
    /// Height of the stage the background is fitted into
    pub stage_height: f64,
    /// Text pre-filled in the real-length prompt
    #[serde(default = "default_length_hint")]
    pub default_length_hint: String,
}

fn default_length_hint() -> String {
    "1m".to_string()
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            stage_width: DEFAULT_STAGE_WIDTH,
            stage_height: DEFAULT_STAGE_HEIGHT,
            default_length_hint: default_length_hint(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Suggested file name for PNG exports
    pub file_name: String,
    /// Draw a 1 px theme outline around exported images
    #[serde(default = "default_true")]
    pub draw_border: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "export.png".to_string(),
            draw_border: true,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    #[serde(default)]
    pub ui: UiSettings,
    /// Export defaults
    #[serde(default)]
    pub export: ExportSettings,
    /// Recent files list, most recent first
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("(none)").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config location: `<config_dir>/scalemark/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("scalemark").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, or returns the defaults when the file does not exist.
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.ui.stage_width > 0.0) {
            return Err(SettingsError::invalid("ui.stage_width", "must be > 0"));
        }
        if !(self.ui.stage_height > 0.0) {
            return Err(SettingsError::invalid("ui.stage_height", "must be > 0"));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(SettingsError::invalid("export.file_name", "must not be empty"));
        }
        Ok(())
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_files.retain(|f| f != &path);

        // Add to front
        self.recent_files.insert(0, path);

        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}
