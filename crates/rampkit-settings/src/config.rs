//! Editor configuration
//!
//! Snap tuning, history depth, autosave and canvas scale. Files may be JSON
//! or TOML; the extension decides which.

use rampkit_core::constants::{
    AUTOSAVE_DEBOUNCE_MS, DEFAULT_PIXELS_PER_MM, HISTORY_LIMIT, MIN_OBJECT_SIZE_MM,
    SNAP_INCREMENTS_MM, SNAP_THRESHOLD_MM,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// File name used inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Snap engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Object snap engages within this distance
    pub threshold_mm: f64,
    /// Resize floor for length and width
    pub min_size_mm: f64,
    pub snap_to_grid: bool,
    pub snap_to_objects: bool,
    /// Grid increment, one of 1, 10, 100 or 1000
    pub increment_mm: u32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            threshold_mm: SNAP_THRESHOLD_MM,
            min_size_mm: MIN_OBJECT_SIZE_MM,
            snap_to_grid: true,
            snap_to_objects: true,
            increment_mm: 10,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo steps
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: HISTORY_LIMIT,
        }
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveSettings {
    pub enabled: bool,
    pub debounce_ms: u64,
    /// Project file written by autosave; none means autosave has nowhere to go
    pub path: Option<PathBuf>,
}

impl Default for AutosaveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: AUTOSAVE_DEBOUNCE_MS,
            path: None,
        }
    }
}

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub pixels_per_mm: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            pixels_per_mm: DEFAULT_PIXELS_PER_MM,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub snap: SnapSettings,
    pub history: HistorySettings,
    pub autosave: AutosaveSettings,
    pub canvas: CanvasSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(Format::Json)
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        Ok(Format::Toml)
    } else {
        Err(ConfigError::UnsupportedFormat(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| "no extension".to_string()),
        ))
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
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
        debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.snap.threshold_mm.is_finite() && self.snap.threshold_mm > 0.0) {
            return Err(SettingsError::invalid("snap.threshold_mm", "must be > 0"));
        }

        if !(self.snap.min_size_mm.is_finite() && self.snap.min_size_mm >= 0.0) {
            return Err(SettingsError::invalid("snap.min_size_mm", "must be >= 0"));
        }

        if !SNAP_INCREMENTS_MM.contains(&self.snap.increment_mm) {
            return Err(SettingsError::invalid(
                "snap.increment_mm",
                format!(
                    "{} is not one of {:?}",
                    self.snap.increment_mm, SNAP_INCREMENTS_MM
                ),
            ));
        }

        if self.history.limit == 0 {
            return Err(SettingsError::invalid("history.limit", "must be > 0"));
        }

        if !(self.canvas.pixels_per_mm.is_finite() && self.canvas.pixels_per_mm > 0.0) {
            return Err(SettingsError::invalid("canvas.pixels_per_mm", "must be > 0"));
        }

        Ok(())
    }
}

/// Default config file location, e.g. `~/.config/rampkit/config.toml` on Linux.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
    })?;
    Ok(dir.join("rampkit").join(CONFIG_FILE_NAME))
}
