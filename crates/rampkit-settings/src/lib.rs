//! RampKit Settings Crate
//!
//! Loads, validates and saves the editor configuration.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, AutosaveSettings, CanvasSettings, EditorConfig, HistorySettings,
    SnapSettings, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
