//! Object update pipeline: patch application, clamping and no-op detection.
//!
//! [`apply_patch`] returns `Cow::Borrowed` when the patched object is
//! structurally equal to the input. Callers rely on that to decide there is
//! nothing to commit to history and nothing to re-render.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use rampkit_core::constants::DEFAULT_ANCHOR_OFFSET_MM;
pub use rampkit_core::round_mm;

use crate::model::{
    MeasurementAnchor, MeasurementAnchors, MeasurementKey, Measurements, Object2D,
};

/// Rounds then clamps into `[min, max]`. Non-finite input maps to `min`.
pub fn clamp_int(value: f64, min: i64, max: Option<i64>) -> i64 {
    if !value.is_finite() {
        return min;
    }
    let mut rounded = round_mm(value);
    if rounded < min as f64 {
        rounded = min as f64;
    }
    if let Some(max) = max {
        if rounded > max as f64 {
            rounded = max as f64;
        }
    }
    rounded as i64
}

/// Rounds to whole degrees and wraps into `[0, 360)`. Negative angles wrap
/// forward; non-finite input maps to 0.
pub fn normalise_deg(value: f64) -> u16 {
    if !value.is_finite() {
        return 0;
    }
    round_mm(value).rem_euclid(360.0) as u16
}

fn clamp_size(value: f64) -> u32 {
    clamp_int(value, 0, Some(i64::from(u32::MAX))) as u32
}

/// Partial update of an object. `None` leaves a field untouched; the two
/// measurement maps merge key by key.
///
/// Ramp-only fields are ignored when the patch targets a landing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectPatch {
    pub x_mm: Option<f64>,
    pub y_mm: Option<f64>,
    pub length_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub elevation_mm: Option<f64>,
    pub rotation_deg: Option<f64>,
    pub locked: Option<bool>,
    pub measurements: Measurements,
    pub measurement_anchors: MeasurementAnchors,
    pub run_mm: Option<f64>,
    pub show_arrow: Option<bool>,
    pub has_left_wing: Option<bool>,
    pub left_wing_size_mm: Option<f64>,
    pub has_right_wing: Option<bool>,
    pub right_wing_size_mm: Option<f64>,
}

impl ObjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x_mm: f64, y_mm: f64) -> Self {
        self.x_mm = Some(x_mm);
        self.y_mm = Some(y_mm);
        self
    }

    pub fn size(mut self, length_mm: f64, width_mm: f64) -> Self {
        self.length_mm = Some(length_mm);
        self.width_mm = Some(width_mm);
        self
    }

    pub fn height(mut self, height_mm: f64) -> Self {
        self.height_mm = Some(height_mm);
        self
    }

    pub fn elevation(mut self, elevation_mm: f64) -> Self {
        self.elevation_mm = Some(elevation_mm);
        self
    }

    pub fn rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = Some(rotation_deg);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn measurement(mut self, key: MeasurementKey, enabled: bool) -> Self {
        self.measurements.insert(key, enabled);
        self
    }

    pub fn anchor(mut self, key: MeasurementKey, anchor: MeasurementAnchor) -> Self {
        self.measurement_anchors.insert(key, anchor);
        self
    }

    pub fn run(mut self, run_mm: f64) -> Self {
        self.run_mm = Some(run_mm);
        self
    }

    pub fn show_arrow(mut self, show: bool) -> Self {
        self.show_arrow = Some(show);
        self
    }

    pub fn left_wing(mut self, enabled: bool, size_mm: f64) -> Self {
        self.has_left_wing = Some(enabled);
        self.left_wing_size_mm = Some(size_mm);
        self
    }

    pub fn right_wing(mut self, enabled: bool, size_mm: f64) -> Self {
        self.has_right_wing = Some(enabled);
        self.right_wing_size_mm = Some(size_mm);
        self
    }

    /// True when the patch sets nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == ObjectPatch::default()
    }
}

/// Applies `patch` to `obj` and normalises the result.
///
/// Returns the input borrowed when nothing observable changed.
pub fn apply_patch<'a>(obj: &'a Object2D, patch: &ObjectPatch) -> Cow<'a, Object2D> {
    let mut next = obj.clone();
    merge_patch(&mut next, patch);
    normalise_in_place(&mut next);

    if next == *obj {
        Cow::Borrowed(obj)
    } else {
        Cow::Owned(next)
    }
}

/// Normalises an object without patching it (used for loaded or
/// hand-built objects).
pub fn normalise_object(obj: &Object2D) -> Cow<'_, Object2D> {
    apply_patch(obj, &ObjectPatch::default())
}

fn merge_patch(obj: &mut Object2D, patch: &ObjectPatch) {
    {
        let base = obj.base_mut();

        if let Some(x) = patch.x_mm.filter(|v| v.is_finite()) {
            base.x_mm = round_mm(x) as i64;
        }
        if let Some(y) = patch.y_mm.filter(|v| v.is_finite()) {
            base.y_mm = round_mm(y) as i64;
        }
        match (patch.length_mm, patch.run_mm) {
            (Some(length), _) => base.length_mm = clamp_size(length),
            (None, Some(run)) => base.length_mm = clamp_size(run),
            (None, None) => {}
        }
        if let Some(width) = patch.width_mm {
            base.width_mm = clamp_size(width);
        }
        if let Some(height) = patch.height_mm {
            base.height_mm = clamp_size(height);
        }
        if let Some(elevation) = patch.elevation_mm {
            base.elevation_mm = clamp_size(elevation);
        }
        if let Some(rotation) = patch.rotation_deg {
            base.rotation_deg = normalise_deg(rotation);
        }
        if let Some(locked) = patch.locked {
            base.locked = locked;
        }
        for (key, enabled) in &patch.measurements {
            base.measurements.insert(*key, *enabled);
        }
        for (key, anchor) in &patch.measurement_anchors {
            base.measurement_anchors.insert(*key, *anchor);
        }
    }

    if let Object2D::Ramp(ramp) = obj {
        if let Some(show) = patch.show_arrow {
            ramp.show_arrow = show;
        }
        if let Some(enabled) = patch.has_left_wing {
            ramp.has_left_wing = enabled;
        }
        if let Some(size) = patch.left_wing_size_mm {
            ramp.left_wing_size_mm = clamp_size(size);
        }
        if let Some(enabled) = patch.has_right_wing {
            ramp.has_right_wing = enabled;
        }
        if let Some(size) = patch.right_wing_size_mm {
            ramp.right_wing_size_mm = clamp_size(size);
        }
    }
}

fn sanitise_anchor(anchor: MeasurementAnchor) -> MeasurementAnchor {
    let offset_mm = if !anchor.offset_mm.is_finite() {
        DEFAULT_ANCHOR_OFFSET_MM
    } else {
        anchor.offset_mm.max(0.0)
    };
    MeasurementAnchor {
        offset_mm,
        orientation: anchor.orientation,
    }
}

fn normalise_in_place(obj: &mut Object2D) {
    {
        let base = obj.base_mut();
        base.rotation_deg %= 360;
        for key in MeasurementKey::ALL {
            base.measurements.entry(key).or_insert(false);
            let anchor = base
                .measurement_anchors
                .get(&key)
                .copied()
                .unwrap_or_default();
            base.measurement_anchors.insert(key, sanitise_anchor(anchor));
        }
    }

    if let Object2D::Ramp(ramp) = obj {
        ramp.run_mm = ramp.base.length_mm;
        if !ramp.has_left_wing {
            ramp.left_wing_size_mm = 0;
        }
        if !ramp.has_right_wing {
            ramp.right_wing_size_mm = 0;
        }
    }
}
