//! Dimension line generation.
//!
//! Segments are derived from an object on every call and never stored.
//! Output order is fixed: L1, L2, W1, W2, WL, WR, H, E.

use serde::{Deserialize, Serialize};

use rampkit_core::constants::{DIMENSION_LABEL_GAP_MM, DIMENSION_TICK_MM};
use rampkit_core::{format_mm, ObjectId};

use crate::geometry::{body_bounding_box, rotate_point, Rect};
use crate::model::{AnchorOrientation, MeasurementAnchor, MeasurementKey, Object2D, Point};
use crate::snapshot::Snapshot;

/// Resolved screen orientation of a dimension line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Object axis a measurement belongs to; decides how `Auto` resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasuredAxis {
    Length,
    Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionVariant {
    Length,
    Width,
    Wing,
    Height,
    Elevation,
}

/// One dimension line ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSegment {
    pub measurement_key: MeasurementKey,
    pub object_id: ObjectId,
    pub start_mm: Point,
    pub end_mm: Point,
    pub orientation: Orientation,
    pub label: String,
    pub variant: DimensionVariant,
    pub tick_length_mm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_offset_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_origin_mm: Option<Point>,
    /// Unit vector pointing away from the object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_direction_mm: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_position_mm: Option<Point>,
}

/// Resolves an anchor's orientation.
///
/// An explicit orientation wins. `Auto` puts the length axis vertical when
/// the object is turned a quarter (90 or 270 degrees) and horizontal
/// otherwise; the width axis takes the perpendicular.
pub fn resolve_orientation(
    anchor: &MeasurementAnchor,
    rotation_deg: u16,
    fallback_axis: MeasuredAxis,
) -> Orientation {
    match anchor.orientation {
        AnchorOrientation::Horizontal => Orientation::Horizontal,
        AnchorOrientation::Vertical => Orientation::Vertical,
        AnchorOrientation::Auto => {
            let length_vertical = rotation_deg % 180 == 90;
            let vertical = match fallback_axis {
                MeasuredAxis::Length => length_vertical,
                MeasuredAxis::Width => !length_vertical,
            };
            if vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            }
        }
    }
}

/// Where a segment sits relative to its object.
struct Placement {
    start: Point,
    end: Point,
    offset: f64,
    origin: Point,
    direction: Point,
    label_position: Point,
}

struct Builder<'a> {
    obj: &'a Object2D,
    rect: Rect,
    segments: Vec<DimensionSegment>,
}

impl<'a> Builder<'a> {
    fn new(obj: &'a Object2D) -> Self {
        Self {
            obj,
            rect: Rect::at(obj.center(), &body_bounding_box(obj)),
            segments: Vec::new(),
        }
    }

    fn enabled(&self, key: MeasurementKey) -> bool {
        self.obj.base().measurement_enabled(key)
    }

    fn push(
        &mut self,
        key: MeasurementKey,
        variant: DimensionVariant,
        orientation: Orientation,
        label: String,
        placement: Placement,
    ) {
        self.segments.push(DimensionSegment {
            measurement_key: key,
            object_id: self.obj.id().clone(),
            start_mm: placement.start,
            end_mm: placement.end,
            orientation,
            label,
            variant,
            tick_length_mm: DIMENSION_TICK_MM,
            anchor_offset_mm: Some(placement.offset),
            anchor_origin_mm: Some(placement.origin),
            anchor_direction_mm: Some(placement.direction),
            label_position_mm: Some(placement.label_position),
        });
    }

    /// L1/L2/W1/W2. The first key of each pair sits on the top or left
    /// edge, the second on the bottom or right edge.
    fn edge(&mut self, key: MeasurementKey) {
        if !self.enabled(key) {
            return;
        }
        let (axis, variant, near) = match key {
            MeasurementKey::L1 => (MeasuredAxis::Length, DimensionVariant::Length, true),
            MeasurementKey::L2 => (MeasuredAxis::Length, DimensionVariant::Length, false),
            MeasurementKey::W1 => (MeasuredAxis::Width, DimensionVariant::Width, true),
            MeasurementKey::W2 => (MeasuredAxis::Width, DimensionVariant::Width, false),
            _ => return,
        };
        let anchor = self.obj.base().anchor(key);
        let offset = anchor.offset_mm;
        let orientation = resolve_orientation(&anchor, self.obj.rotation_deg(), axis);
        let r = self.rect;
        let center = r.center();

        let (origin, direction, extent) = match (orientation, near) {
            (Orientation::Horizontal, true) => {
                (Point::new(center.x, r.min_y), Point::new(0.0, -1.0), r.width())
            }
            (Orientation::Horizontal, false) => {
                (Point::new(center.x, r.max_y), Point::new(0.0, 1.0), r.width())
            }
            (Orientation::Vertical, true) => {
                (Point::new(r.min_x, center.y), Point::new(-1.0, 0.0), r.height())
            }
            (Orientation::Vertical, false) => {
                (Point::new(r.max_x, center.y), Point::new(1.0, 0.0), r.height())
            }
        };

        let shift = direction * offset;
        let (start, end) = match orientation {
            Orientation::Horizontal => (
                Point::new(r.min_x, origin.y) + shift,
                Point::new(r.max_x, origin.y) + shift,
            ),
            Orientation::Vertical => (
                Point::new(origin.x, r.min_y) + shift,
                Point::new(origin.x, r.max_y) + shift,
            ),
        };
        let label_position = start.midpoint(end) + direction * DIMENSION_LABEL_GAP_MM;

        self.push(
            key,
            variant,
            orientation,
            format_mm(extent),
            Placement {
                start,
                end,
                offset,
                origin,
                direction,
                label_position,
            },
        );
    }

    /// WL/WR: from the body edge to the wing tip along the length axis.
    fn wing(&mut self, key: MeasurementKey) {
        let Some(ramp) = self.obj.as_ramp() else {
            return;
        };
        let (enabled, size, side) = match key {
            MeasurementKey::WL => (ramp.has_left_wing, ramp.left_wing_size_mm, -1.0),
            MeasurementKey::WR => (ramp.has_right_wing, ramp.right_wing_size_mm, 1.0),
            _ => return,
        };
        if !enabled || size == 0 || !self.enabled(key) {
            return;
        }

        let rotation = f64::from(self.obj.rotation_deg());
        let center = self.obj.center();
        let half_length = f64::from(ramp.base.length_mm) / 2.0;
        let size = f64::from(size);

        let start = center + rotate_point(Point::new(side * half_length, 0.0), rotation);
        let end = center + rotate_point(Point::new(side * (half_length + size), 0.0), rotation);
        let direction = rotate_point(Point::new(side, 0.0), rotation);

        let anchor = self.obj.base().anchor(key);
        let offset = anchor.offset_mm;
        let orientation =
            resolve_orientation(&anchor, self.obj.rotation_deg(), MeasuredAxis::Length);

        self.push(
            key,
            DimensionVariant::Wing,
            orientation,
            format_mm(size),
            Placement {
                start,
                end,
                offset,
                origin: end,
                direction,
                label_position: end + direction * offset,
            },
        );
    }

    fn height(&mut self) {
        if !self.enabled(MeasurementKey::H) {
            return;
        }
        let anchor = self.obj.base().anchor(MeasurementKey::H);
        let offset = anchor.offset_mm;
        let origin = self.rect.center();
        let direction = Point::new(0.0, -1.0);
        let end = origin + direction * offset.max(DIMENSION_TICK_MM);

        self.push(
            MeasurementKey::H,
            DimensionVariant::Height,
            Orientation::Vertical,
            format!("H {}", format_mm(f64::from(self.obj.base().height_mm))),
            Placement {
                start: origin,
                end,
                offset,
                origin,
                direction,
                label_position: end + direction * DIMENSION_LABEL_GAP_MM,
            },
        );
    }

    fn elevation(&mut self) {
        let elevation = self.obj.base().elevation_mm;
        if elevation == 0 || !self.enabled(MeasurementKey::E) {
            return;
        }
        let anchor = self.obj.base().anchor(MeasurementKey::E);
        let offset = anchor.offset_mm;
        let r = self.rect;
        let origin = Point::new(r.min_x, r.center().y);
        let direction = Point::new(-1.0, 0.0);
        let x = r.min_x - offset;
        let start = Point::new(x, r.min_y);
        let end = Point::new(x, r.max_y);

        self.push(
            MeasurementKey::E,
            DimensionVariant::Elevation,
            Orientation::Vertical,
            format!("E {}", format_mm(f64::from(elevation))),
            Placement {
                start,
                end,
                offset,
                origin,
                direction,
                label_position: start.midpoint(end) + direction * DIMENSION_LABEL_GAP_MM,
            },
        );
    }
}

/// All visible dimension segments of `obj`.
pub fn dimension_segments(obj: &Object2D) -> Vec<DimensionSegment> {
    let mut builder = Builder::new(obj);
    for key in [
        MeasurementKey::L1,
        MeasurementKey::L2,
        MeasurementKey::W1,
        MeasurementKey::W2,
    ] {
        builder.edge(key);
    }
    builder.wing(MeasurementKey::WL);
    builder.wing(MeasurementKey::WR);
    builder.height();
    builder.elevation();
    builder.segments
}

/// Segments for every object, in object order.
pub fn snapshot_dimensions(snapshot: &Snapshot) -> Vec<DimensionSegment> {
    snapshot
        .objects
        .iter()
        .flat_map(dimension_segments)
        .collect()
}
