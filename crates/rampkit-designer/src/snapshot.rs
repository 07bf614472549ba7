//! Editor snapshot: the object list plus selection and snap configuration.
//!
//! Snapshots are values. Every operation here takes `&self` and hands back a
//! new snapshot, or borrows the input when nothing changed.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, warn};

use rampkit_core::ObjectId;

use crate::model::{MeasurementKey, Object2D};
use crate::normalise::{apply_patch, ObjectPatch};

/// Grid increment choices offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SnapIncrement {
    Mm1,
    #[default]
    Mm10,
    Mm100,
    Mm1000,
}

impl SnapIncrement {
    pub const ALL: [SnapIncrement; 4] = [
        SnapIncrement::Mm1,
        SnapIncrement::Mm10,
        SnapIncrement::Mm100,
        SnapIncrement::Mm1000,
    ];

    pub fn as_mm(self) -> u32 {
        match self {
            SnapIncrement::Mm1 => 1,
            SnapIncrement::Mm10 => 10,
            SnapIncrement::Mm100 => 100,
            SnapIncrement::Mm1000 => 1000,
        }
    }
}

impl From<SnapIncrement> for u32 {
    fn from(value: SnapIncrement) -> Self {
        value.as_mm()
    }
}

impl TryFrom<u32> for SnapIncrement {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        SnapIncrement::ALL
            .into_iter()
            .find(|inc| inc.as_mm() == value)
            .ok_or_else(|| format!("unsupported snap increment: {}mm", value))
    }
}

impl fmt::Display for SnapIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.as_mm())
    }
}

/// Complete editable state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub objects: Vec<Object2D>,
    #[serde(default)]
    pub selected_id: Option<ObjectId>,
    #[serde(default)]
    pub selected_measurement_key: Option<MeasurementKey>,
    pub snap_to_grid: bool,
    pub snap_to_objects: bool,
    pub snap_increment_mm: SnapIncrement,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            selected_id: None,
            selected_measurement_key: None,
            snap_to_grid: true,
            snap_to_objects: true,
            snap_increment_mm: SnapIncrement::default(),
        }
    }
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, id: &ObjectId) -> Option<&Object2D> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_index(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.object_index(id).is_some()
    }

    /// Selected id, ignoring a selection that points at a missing object.
    pub fn effective_selected_id(&self) -> Option<&ObjectId> {
        self.selected_object().map(|o| o.id())
    }

    /// Selected object. A dangling selection reads as no selection.
    pub fn selected_object(&self) -> Option<&Object2D> {
        let id = self.selected_id.as_ref()?;
        let found = self.object(id);
        if found.is_none() {
            warn!("Selection references missing object {}", id);
        }
        found
    }

    /// Grid step used for snapping; 1mm when grid snapping is off.
    pub fn grid_step(&self) -> f64 {
        if self.snap_to_grid {
            f64::from(self.snap_increment_mm.as_mm())
        } else {
            1.0
        }
    }

    /// Keyboard nudge distance. Same as [`Snapshot::grid_step`].
    pub fn nudge_step(&self) -> f64 {
        self.grid_step()
    }

    /// Appends `obj`. An object with the same id is replaced in place so ids
    /// stay unique.
    pub fn add_object(&self, obj: Object2D) -> Snapshot {
        let mut next = self.clone();
        match next.object_index(obj.id()) {
            Some(index) => {
                warn!("Replacing object with duplicate id {}", obj.id());
                next.objects[index] = obj;
            }
            None => {
                debug!("Added {} {}", obj.kind(), obj.id());
                next.objects.push(obj);
            }
        }
        next
    }

    /// Removes an object, clearing the selection if it pointed there.
    pub fn remove_object(&self, id: &ObjectId) -> Cow<'_, Snapshot> {
        let Some(index) = self.object_index(id) else {
            return Cow::Borrowed(self);
        };
        let mut next = self.clone();
        next.objects.remove(index);
        if next.selected_id.as_ref() == Some(id) {
            next.selected_id = None;
            next.selected_measurement_key = None;
        }
        debug!("Removed object {}", id);
        Cow::Owned(next)
    }

    /// Applies `patch` to one object.
    ///
    /// Borrows `self` when the id is unknown or the patch changes nothing.
    pub fn update_object(&self, id: &ObjectId, patch: &ObjectPatch) -> Cow<'_, Snapshot> {
        let Some(index) = self.object_index(id) else {
            debug!("Ignoring update for unknown object {}", id);
            return Cow::Borrowed(self);
        };
        match apply_patch(&self.objects[index], patch) {
            Cow::Borrowed(_) => Cow::Borrowed(self),
            Cow::Owned(updated) => {
                let mut next = self.clone();
                next.objects[index] = updated;
                Cow::Owned(next)
            }
        }
    }

    /// Changes the selection. Selecting an unknown id is a no-op; changing
    /// the selected object clears the selected measurement.
    pub fn select(&self, id: Option<&ObjectId>) -> Cow<'_, Snapshot> {
        if let Some(id) = id {
            if !self.contains(id) {
                return Cow::Borrowed(self);
            }
        }
        if self.selected_id.as_ref() == id {
            return Cow::Borrowed(self);
        }
        let mut next = self.clone();
        next.selected_id = id.cloned();
        next.selected_measurement_key = None;
        Cow::Owned(next)
    }

    pub fn select_measurement(&self, key: Option<MeasurementKey>) -> Cow<'_, Snapshot> {
        if self.selected_measurement_key == key {
            return Cow::Borrowed(self);
        }
        let mut next = self.clone();
        next.selected_measurement_key = key;
        Cow::Owned(next)
    }

    pub fn set_snap_config(
        &self,
        snap_to_grid: bool,
        snap_to_objects: bool,
        increment: SnapIncrement,
    ) -> Cow<'_, Snapshot> {
        if self.snap_to_grid == snap_to_grid
            && self.snap_to_objects == snap_to_objects
            && self.snap_increment_mm == increment
        {
            return Cow::Borrowed(self);
        }
        let mut next = self.clone();
        next.snap_to_grid = snap_to_grid;
        next.snap_to_objects = snap_to_objects;
        next.snap_increment_mm = increment;
        Cow::Owned(next)
    }

    /// Drops a selection that references a missing object.
    pub fn reconcile_selection(&self) -> Cow<'_, Snapshot> {
        match &self.selected_id {
            Some(id) if !self.contains(id) => {
                warn!("Clearing dangling selection {}", id);
                let mut next = self.clone();
                next.selected_id = None;
                next.selected_measurement_key = None;
                Cow::Owned(next)
            }
            _ => Cow::Borrowed(self),
        }
    }
}
