//! # RampKit
//!
//! A millimetre-accurate layout engine for ramp and landing plans:
//! - Rotation-aware geometry with wing extensions
//! - Face and point-of-interest snapping with grid fallback
//! - Automatic dimension lines with per-measurement anchors
//! - Bounded undo/redo with live previews
//!
//! ## Architecture
//!
//! RampKit is organized as a workspace with multiple crates:
//!
//! 1. **rampkit-core** - Ids, errors, unit helpers, constants
//! 2. **rampkit-designer** - Object model, geometry, snapping, dimensions, history, sessions, project files
//! 3. **rampkit-settings** - Editor configuration (JSON or TOML)
//! 4. **rampkit** - Logging, configuration wiring and the `rampkit` CLI

use std::time::Duration;

pub use rampkit_designer as designer;
pub use rampkit_settings as settings;

pub use rampkit_core::{CounterIds, Error, IdGenerator, ObjectId, ProjectError, Result, UuidIds};

pub use rampkit_designer::{
    dimension_segments, snapshot_dimensions, AutosaveHandle, DimensionSegment, EditorSession,
    HistoryLog, JsonFileStore, MeasurementKey, Object2D, ObjectKind, ObjectPatch,
    PersistedProject, Point, ProjectStore, SnapIncrement, SnapOptions, Snapshot, Tool, ViewMode,
};

pub use rampkit_settings::{default_config_path, EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Environment variable that switches log output to JSON lines.
pub const LOG_JSON_ENV: &str = "RAMPKIT_LOG_JSON";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (default `info`)
/// - Human-readable output on stderr, or JSON lines when `RAMPKIT_LOG_JSON=1`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_JSON_ENV).is_ok_and(|v| v == "1");

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Snap tuning taken from the `[snap]` section.
pub fn snap_options_from_config(config: &EditorConfig) -> SnapOptions {
    SnapOptions {
        threshold_mm: config.snap.threshold_mm,
        min_size_mm: config.snap.min_size_mm,
    }
}

/// Empty snapshot carrying the configured snap toggles and grid increment.
pub fn snapshot_from_config(config: &EditorConfig) -> Snapshot {
    Snapshot {
        snap_to_grid: config.snap.snap_to_grid,
        snap_to_objects: config.snap.snap_to_objects,
        snap_increment_mm: SnapIncrement::try_from(config.snap.increment_mm).unwrap_or_default(),
        ..Snapshot::default()
    }
}

/// Editing session over `snapshot` with the configured history depth and snap tuning.
pub fn session_from_config(snapshot: Snapshot, config: &EditorConfig) -> EditorSession {
    EditorSession::with_history(
        HistoryLog::with_limit(snapshot, config.history.limit),
        snap_options_from_config(config),
    )
}

/// Starts the autosave worker when autosave is enabled and has a target file.
///
/// Must be called from within a tokio runtime.
pub fn autosave_from_config(config: &EditorConfig) -> Option<AutosaveHandle> {
    if !config.autosave.enabled {
        return None;
    }
    let path = config.autosave.path.as_ref()?;
    Some(AutosaveHandle::with_debounce(
        JsonFileStore::new(path),
        Duration::from_millis(config.autosave.debounce_ms),
    ))
}
