//! Interactive editing session.
//!
//! `EditorSession` drives the engine from pointer and keyboard input. It owns
//! the history log and the current gesture:
//!
//! ```text
//! Idle --pointer down on object--> Dragging --pointer up--> Idle
//! Idle --pointer down on handle--> Resizing --pointer up--> Idle
//! Idle --begin pan--------------> Panning  --pointer up--> Idle
//! ```
//!
//! Pointer moves during a drag or resize only replace the live snapshot.
//! Pointer up commits exactly one undo step if anything changed; cancelling
//! restores the last committed snapshot. Panning never touches the snapshot.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

use rampkit_core::units::round_to_step;
use rampkit_core::{round_mm, IdGenerator, ObjectId};

use crate::dimensions::{snapshot_dimensions, DimensionSegment};
use crate::geometry::{center_from_top_left, object_bounding_box, top_left_from_center};
use crate::history::HistoryLog;
use crate::model::{MeasurementKey, Object2D, ObjectKind, Point};
use crate::normalise::ObjectPatch;
use crate::snap::{snap_move, snap_resize, Corner, SnapGuide, SnapOptions};
use crate::snapshot::{SnapIncrement, Snapshot};

/// Active editor tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Ramp,
    Landing,
    Pan,
}

impl Tool {
    /// Object kind placed by a click with this tool.
    pub fn placing_kind(self) -> Option<ObjectKind> {
        match self {
            Tool::Ramp => Some(ObjectKind::Ramp),
            Tool::Landing => Some(ObjectKind::Landing),
            Tool::Select | Tool::Pan => None,
        }
    }
}

/// Pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        id: ObjectId,
        /// Object centre minus the pointer position at pointer down
        grab_offset: Point,
    },
    Resizing {
        id: ObjectId,
        corner: Corner,
    },
    Panning {
        last: Point,
    },
}

/// Feedback from [`EditorSession::pointer_move`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFeedback {
    pub guide: SnapGuide,
    /// Viewport shift while panning
    pub pan_delta: Option<Point>,
}

fn changed(next: Cow<'_, Snapshot>) -> Option<Snapshot> {
    match next {
        Cow::Owned(snapshot) => Some(snapshot),
        Cow::Borrowed(_) => None,
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    history: HistoryLog,
    options: SnapOptions,
    tool: Tool,
    gesture: Gesture,
    guide: SnapGuide,
}

impl EditorSession {
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_history(HistoryLog::new(snapshot), SnapOptions::default())
    }

    pub fn with_history(history: HistoryLog, options: SnapOptions) -> Self {
        Self {
            history,
            options,
            tool: Tool::default(),
            gesture: Gesture::Idle,
            guide: SnapGuide::default(),
        }
    }

    /// Live snapshot, including any in-progress preview.
    pub fn snapshot(&self) -> &Snapshot {
        self.history.present()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SnapOptions) {
        self.options = options;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.cancel_gesture();
            debug!("Tool {:?} -> {:?}", self.tool, tool);
            self.tool = tool;
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Guide from the last pointer move of the current gesture.
    pub fn guide(&self) -> SnapGuide {
        self.guide
    }

    /// Finishes any gesture, applies `edit` to the committed snapshot and
    /// commits the result if it changed anything.
    fn commit_with(&mut self, edit: impl FnOnce(&Snapshot) -> Option<Snapshot>) -> bool {
        self.cancel_gesture();
        match edit(self.history.present()) {
            Some(next) => {
                self.history.commit(next);
                true
            }
            None => false,
        }
    }

    fn selected_unlocked(&self) -> Option<&Object2D> {
        self.snapshot()
            .selected_object()
            .filter(|obj| !obj.is_locked())
    }

    /// Places a new object at `point`, snapped like a move, and selects it.
    pub fn place_object(
        &mut self,
        kind: ObjectKind,
        point: Point,
        ids: &mut dyn IdGenerator,
    ) -> ObjectId {
        self.cancel_gesture();
        let obj = Object2D::new_of_kind(kind, ids, point);
        let id = obj.id().clone();

        let mut next = self.snapshot().add_object(obj);
        if let Some(snap) = snap_move(&next, &id, point, &self.options) {
            let patch = ObjectPatch::new().position(snap.center.x, snap.center.y);
            if let Some(moved) = changed(next.update_object(&id, &patch)) {
                next = moved;
            }
        }
        if let Some(selected) = changed(next.select(Some(&id))) {
            next = selected;
        }

        debug!("Placed {} {} at ({:.0}, {:.0})", kind, id, point.x, point.y);
        self.history.commit(next);
        id
    }

    /// Clicks the place tool at `point`. Returns the new id, or `None` when
    /// the active tool does not place objects.
    pub fn click_with_tool(&mut self, point: Point, ids: &mut dyn IdGenerator) -> Option<ObjectId> {
        let kind = self.tool.placing_kind()?;
        Some(self.place_object(kind, point, ids))
    }

    /// Selects `id` and starts dragging it unless it is locked.
    ///
    /// The selection change is a preview until [`EditorSession::pointer_up`].
    pub fn pointer_down_on_object(&mut self, id: &ObjectId, point: Point) -> bool {
        self.cancel_gesture();
        let Some(obj) = self.snapshot().object(id) else {
            return false;
        };
        let grab_offset = obj.center() - point;
        let locked = obj.is_locked();

        if let Some(selected) = changed(self.snapshot().select(Some(id))) {
            self.history.replace_present(selected);
        }
        if !locked {
            debug!("Gesture Idle -> Dragging {}", id);
            self.gesture = Gesture::Dragging {
                id: id.clone(),
                grab_offset,
            };
        }
        true
    }

    /// Starts resizing `id` from `corner`. Locked objects do not resize.
    pub fn pointer_down_on_handle(&mut self, id: &ObjectId, corner: Corner) -> bool {
        self.cancel_gesture();
        match self.snapshot().object(id) {
            Some(obj) if !obj.is_locked() => {}
            _ => return false,
        }
        if let Some(selected) = changed(self.snapshot().select(Some(id))) {
            self.history.replace_present(selected);
        }
        debug!("Gesture Idle -> Resizing {} {:?}", id, corner);
        self.gesture = Gesture::Resizing {
            id: id.clone(),
            corner,
        };
        true
    }

    pub fn begin_pan(&mut self, point: Point) {
        self.cancel_gesture();
        debug!("Gesture Idle -> Panning");
        self.gesture = Gesture::Panning { last: point };
    }

    /// Advances the current gesture to `point`.
    pub fn pointer_move(&mut self, point: Point) -> PointerFeedback {
        match self.gesture.clone() {
            Gesture::Idle => PointerFeedback::default(),
            Gesture::Panning { last } => {
                self.gesture = Gesture::Panning { last: point };
                PointerFeedback {
                    guide: SnapGuide::default(),
                    pan_delta: Some(point - last),
                }
            }
            Gesture::Dragging { id, grab_offset } => {
                let Some(snap) = snap_move(self.snapshot(), &id, point + grab_offset, &self.options)
                else {
                    return PointerFeedback::default();
                };
                let patch = ObjectPatch::new().position(snap.center.x, snap.center.y);
                if let Some(next) = changed(self.snapshot().update_object(&id, &patch)) {
                    self.history.replace_present(next);
                }
                self.guide = snap.guide;
                PointerFeedback {
                    guide: snap.guide,
                    pan_delta: None,
                }
            }
            Gesture::Resizing { id, corner } => {
                // Anchor on the pre-gesture object; the preview carries rounded sizes
                let committed = self.history.committed();
                let Some(snap) = snap_resize(committed, &id, corner, point, &self.options) else {
                    return PointerFeedback::default();
                };
                let patch = ObjectPatch::new()
                    .size(snap.length_mm, snap.width_mm)
                    .position(snap.center.x, snap.center.y);
                if let Some(next) = changed(self.snapshot().update_object(&id, &patch)) {
                    self.history.replace_present(next);
                }
                self.guide = snap.guide;
                PointerFeedback {
                    guide: snap.guide,
                    pan_delta: None,
                }
            }
        }
    }

    /// Ends the gesture. Commits one undo step if the live snapshot differs
    /// from the last committed one.
    pub fn pointer_up(&mut self) -> bool {
        if self.gesture != Gesture::Idle {
            debug!("Gesture -> Idle");
        }
        self.gesture = Gesture::Idle;
        self.guide = SnapGuide::default();

        if !self.history.has_pending_preview() {
            return false;
        }
        if self.history.present() == self.history.committed() {
            self.history.cancel_preview();
            return false;
        }
        let next = self.history.present().clone();
        self.history.commit(next);
        true
    }

    /// Abandons the gesture and restores the last committed snapshot.
    pub fn cancel_gesture(&mut self) {
        if self.gesture != Gesture::Idle {
            debug!("Gesture cancelled");
        }
        self.gesture = Gesture::Idle;
        self.guide = SnapGuide::default();
        self.history.cancel_preview();
    }

    /// Moves the selected object by whole nudge steps, keeping its top-left
    /// on the grid.
    pub fn nudge_selected(&mut self, dx_steps: i32, dy_steps: i32) -> bool {
        if dx_steps == 0 && dy_steps == 0 {
            return false;
        }
        self.cancel_gesture();
        let Some(obj) = self.selected_unlocked() else {
            return false;
        };
        let id = obj.id().clone();
        let step = self.snapshot().nudge_step();
        let bbox = object_bounding_box(obj);
        let target = obj.center() + Point::new(f64::from(dx_steps), f64::from(dy_steps)) * step;

        let mut top_left = top_left_from_center(target, &bbox);
        top_left.x = round_to_step(top_left.x, step);
        top_left.y = round_to_step(top_left.y, step);
        let center = center_from_top_left(top_left, &bbox);
        let patch = ObjectPatch::new().position(round_mm(center.x), round_mm(center.y));

        self.commit_with(|s| changed(s.update_object(&id, &patch)))
    }

    pub fn rotate_selected(&mut self, delta_deg: f64) -> bool {
        self.cancel_gesture();
        let Some(obj) = self.selected_unlocked() else {
            return false;
        };
        let id = obj.id().clone();
        let patch = ObjectPatch::new().rotation(f64::from(obj.rotation_deg()) + delta_deg);
        self.commit_with(|s| changed(s.update_object(&id, &patch)))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.cancel_gesture();
        let Some(id) = self.snapshot().effective_selected_id().cloned() else {
            return false;
        };
        self.commit_with(|s| changed(s.remove_object(&id)))
    }

    pub fn update_selected(&mut self, patch: &ObjectPatch) -> bool {
        self.cancel_gesture();
        let Some(id) = self.snapshot().effective_selected_id().cloned() else {
            return false;
        };
        self.commit_with(|s| changed(s.update_object(&id, patch)))
    }

    pub fn toggle_measurement(&mut self, key: MeasurementKey) -> bool {
        self.cancel_gesture();
        let Some(obj) = self.snapshot().selected_object() else {
            return false;
        };
        let id = obj.id().clone();
        let patch = ObjectPatch::new().measurement(key, !obj.base().measurement_enabled(key));
        self.commit_with(|s| changed(s.update_object(&id, &patch)))
    }

    pub fn select(&mut self, id: Option<&ObjectId>) -> bool {
        self.commit_with(|s| changed(s.select(id)))
    }

    pub fn select_measurement(&mut self, key: Option<MeasurementKey>) -> bool {
        self.commit_with(|s| changed(s.select_measurement(key)))
    }

    pub fn set_snap_config(
        &mut self,
        snap_to_grid: bool,
        snap_to_objects: bool,
        increment: SnapIncrement,
    ) -> bool {
        self.commit_with(|s| changed(s.set_snap_config(snap_to_grid, snap_to_objects, increment)))
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.redo()
    }

    /// Dimension segments of the live snapshot.
    pub fn dimensions(&self) -> Vec<DimensionSegment> {
        snapshot_dimensions(self.snapshot())
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
