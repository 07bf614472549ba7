//! Editor-wide constants.

/// Distance within which a face or point of interest snaps to another object.
pub const SNAP_THRESHOLD_MM: f64 = 20.0;

/// Smallest length or width a resize gesture may produce.
pub const MIN_OBJECT_SIZE_MM: f64 = 100.0;

/// Maximum number of undo steps kept in history.
pub const HISTORY_LIMIT: usize = 50;

/// Default distance between an object edge and its dimension line.
pub const DEFAULT_ANCHOR_OFFSET_MM: f64 = 200.0;

/// Length of the end ticks drawn on dimension lines.
pub const DIMENSION_TICK_MM: f64 = 60.0;

/// Gap between a dimension line and its label.
pub const DIMENSION_LABEL_GAP_MM: f64 = 40.0;

/// Grid increments offered by the editor.
pub const SNAP_INCREMENTS_MM: [u32; 4] = [1, 10, 100, 1000];

/// Delay before a changed project is written to disk.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 200;

/// Schema version written into project files.
pub const PROJECT_SCHEMA_VERSION: u32 = 3;

/// Fixed screen ratio used by the default canvas.
pub const DEFAULT_PIXELS_PER_MM: f64 = 0.2;
