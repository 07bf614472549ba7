//! # RampKit Designer
//!
//! Layout engine for ramp and landing plans. It produces millimetre-exact,
//! deterministic geometry independent of any rendering surface.
//!
//! ## Core Components
//!
//! ### Engine
//! - **Geometry**: rotation, wing-aware footprints, bounding boxes
//! - **Normalise**: patch application, clamping, no-op detection
//! - **Snap**: grid and object face/point snapping for move and resize
//! - **Dimensions**: measurement segments for edges, wings, height, elevation
//! - **History**: undo/redo with live previews
//!
//! ### Editing
//! - **Session**: pointer and keyboard gestures driving the engine
//! - **Project**: project files and the `ProjectStore` abstraction
//! - **Autosave**: debounced background writes
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── HistoryLog (past / present / future snapshots)
//!   ├── Snap engine ──> Geometry
//!   └── Update pipeline ──> Snapshot ──> Dimensions
//!
//! PersistedProject <──> ProjectStore (JsonFileStore)
//!   └── AutosaveHandle (tokio)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rampkit_core::CounterIds;
//! use rampkit_designer::{EditorSession, ObjectKind, Point};
//!
//! let mut ids = CounterIds::new();
//! let mut session = EditorSession::default();
//! let id = session.place_object(ObjectKind::Landing, Point::new(0.0, 0.0), &mut ids);
//!
//! session.pointer_down_on_object(&id, Point::new(0.0, 0.0));
//! session.pointer_move(Point::new(495.0, 0.0));
//! session.pointer_up();
//!
//! for segment in session.dimensions() {
//!     println!("{} {}", segment.measurement_key, segment.label);
//! }
//! ```

pub mod autosave;
pub mod dimensions;
pub mod geometry;
pub mod history;
pub mod model;
pub mod normalise;
pub mod project;
pub mod session;
pub mod snap;
pub mod snapshot;

pub use autosave::AutosaveHandle;
pub use dimensions::{
    dimension_segments, resolve_orientation, snapshot_dimensions, DimensionSegment,
    DimensionVariant, MeasuredAxis, Orientation,
};
pub use geometry::{
    body_bounding_box, bounding_box_from_points, center_from_top_left, local_footprint,
    object_bounding_box, object_rect, rotate_point, top_left_from_center, world_outline,
    BoundingBox, Footprint, Rect,
};
pub use history::HistoryLog;
pub use model::{
    AnchorOrientation, BaseObj, LandingObj, MeasurementAnchor, MeasurementKey, Object2D,
    ObjectKind, Point, RampObj,
};
pub use normalise::{apply_patch, clamp_int, normalise_deg, normalise_object, ObjectPatch};
pub use project::{JsonFileStore, PersistedProject, ProjectStore, ViewMode};
pub use session::{EditorSession, Gesture, PointerFeedback, Tool};
pub use snap::{
    snap_move, snap_resize, AxisSnap, Corner, MoveSnap, ResizeSnap, SnapGuide, SnapKind,
    SnapOptions,
};
pub use snapshot::{SnapIncrement, Snapshot};
