//! Snap engine for drag-move and corner-resize.
//!
//! Object snapping compares the active footprint against every other object's
//! footprint, axis by axis. Two kinds of match exist:
//!
//! - **Face**: one of {left, centre-x, right} (or {top, centre-y, bottom})
//!   lies within the threshold of a face of the other box.
//! - **POI**: one of the nine points of interest lines up with one of the
//!   other box's points within the threshold on that axis.
//!
//! Per axis a face match always beats a POI match, then the smaller absolute
//! delta wins, then the first candidate found in snapshot order. An axis with
//! no object match falls back to the grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rampkit_core::constants::{MIN_OBJECT_SIZE_MM, SNAP_THRESHOLD_MM};
use rampkit_core::units::round_to_step;
use rampkit_core::{round_mm, ObjectId};

use crate::geometry::{
    center_from_top_left, local_footprint, object_bounding_box, object_rect, rotate_point,
    top_left_from_center, Rect,
};
use crate::model::Point;
use crate::snapshot::Snapshot;

/// Tunables for the snap search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapOptions {
    /// Maximum distance at which an object snap engages
    pub threshold_mm: f64,
    /// Smallest length or width a resize can produce
    pub min_size_mm: f64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            threshold_mm: SNAP_THRESHOLD_MM,
            min_size_mm: MIN_OBJECT_SIZE_MM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapKind {
    Face,
    Poi,
}

/// One snapped axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSnap {
    /// World coordinate of the guide line
    pub coordinate: f64,
    pub kind: SnapKind,
    /// Matched point for POI snaps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
}

/// Guide lines to draw for the current gesture. Render-only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapGuide {
    pub x: Option<AxisSnap>,
    pub y: Option<AxisSnap>,
}

impl SnapGuide {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    pub fn snapped_x(&self) -> Option<f64> {
        self.x.map(|s| s.coordinate)
    }

    pub fn snapped_y(&self) -> Option<f64> {
        self.y.map(|s| s.coordinate)
    }

    /// The matched point of a POI snap, x axis first.
    pub fn snapped_point(&self) -> Option<Point> {
        self.x
            .and_then(|s| s.point)
            .or_else(|| self.y.and_then(|s| s.point))
    }
}

/// Result of [`snap_move`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSnap {
    pub center: Point,
    pub guide: SnapGuide,
}

/// Resize handle, named in the object's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Local direction of the handle: `(-1|1, -1|1)`.
    pub fn signs(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (-1.0, -1.0),
            Corner::TopRight => (1.0, -1.0),
            Corner::BottomLeft => (-1.0, 1.0),
            Corner::BottomRight => (1.0, 1.0),
        }
    }

    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// Result of [`snap_resize`]. Sizes exclude ramp wings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSnap {
    pub length_mm: f64,
    pub width_mm: f64,
    pub center: Point,
    pub guide: SnapGuide,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    delta: f64,
    snap: AxisSnap,
}

impl Candidate {
    fn beats(&self, other: &Candidate) -> bool {
        match (self.snap.kind, other.snap.kind) {
            (SnapKind::Face, SnapKind::Poi) => true,
            (SnapKind::Poi, SnapKind::Face) => false,
            _ => self.delta.abs() < other.delta.abs(),
        }
    }
}

#[derive(Debug, Default)]
struct AxisMatches {
    x: Option<Candidate>,
    y: Option<Candidate>,
}

impl AxisMatches {
    fn offer_x(&mut self, candidate: Candidate) {
        Self::offer(&mut self.x, candidate);
    }

    fn offer_y(&mut self, candidate: Candidate) {
        Self::offer(&mut self.y, candidate);
    }

    fn offer(slot: &mut Option<Candidate>, candidate: Candidate) {
        match slot {
            Some(best) if !candidate.beats(best) => {}
            _ => *slot = Some(candidate),
        }
    }

    fn guide(&self) -> SnapGuide {
        SnapGuide {
            x: self.x.map(|c| c.snap),
            y: self.y.map(|c| c.snap),
        }
    }
}

/// What the active object exposes to the search.
struct Probe<'a> {
    faces_x: &'a [f64],
    faces_y: &'a [f64],
    points: &'a [Point],
}

fn search(probe: &Probe<'_>, targets: &[Rect], threshold: f64) -> AxisMatches {
    let mut matches = AxisMatches::default();

    for target in targets {
        for &active in probe.faces_x {
            for coordinate in target.faces_x() {
                let delta = coordinate - active;
                if delta.abs() <= threshold {
                    matches.offer_x(Candidate {
                        delta,
                        snap: AxisSnap {
                            coordinate,
                            kind: SnapKind::Face,
                            point: None,
                        },
                    });
                }
            }
        }

        for &active in probe.faces_y {
            for coordinate in target.faces_y() {
                let delta = coordinate - active;
                if delta.abs() <= threshold {
                    matches.offer_y(Candidate {
                        delta,
                        snap: AxisSnap {
                            coordinate,
                            kind: SnapKind::Face,
                            point: None,
                        },
                    });
                }
            }
        }

        for active in probe.points {
            for point in target.points_of_interest() {
                let dx = point.x - active.x;
                let dy = point.y - active.y;
                if dx.abs() <= threshold {
                    matches.offer_x(Candidate {
                        delta: dx,
                        snap: AxisSnap {
                            coordinate: point.x,
                            kind: SnapKind::Poi,
                            point: Some(point),
                        },
                    });
                }
                if dy.abs() <= threshold {
                    matches.offer_y(Candidate {
                        delta: dy,
                        snap: AxisSnap {
                            coordinate: point.y,
                            kind: SnapKind::Poi,
                            point: Some(point),
                        },
                    });
                }
            }
        }
    }

    matches
}

fn other_rects(snapshot: &Snapshot, id: &ObjectId) -> Vec<Rect> {
    snapshot
        .objects
        .iter()
        .filter(|o| o.id() != id)
        .map(object_rect)
        .collect()
}

/// Snaps a proposed centre for object `id` during a move.
///
/// Returns `None` when `id` is not in the snapshot.
pub fn snap_move(
    snapshot: &Snapshot,
    id: &ObjectId,
    proposed_center: Point,
    options: &SnapOptions,
) -> Option<MoveSnap> {
    let obj = snapshot.object(id)?;
    let bbox = object_bounding_box(obj);
    let active = Rect::at(proposed_center, &bbox);

    let matches = if snapshot.snap_to_objects {
        let faces_x = active.faces_x();
        let faces_y = active.faces_y();
        let points = active.points_of_interest();
        let probe = Probe {
            faces_x: &faces_x,
            faces_y: &faces_y,
            points: &points,
        };
        search(&probe, &other_rects(snapshot, id), options.threshold_mm)
    } else {
        AxisMatches::default()
    };

    let step = snapshot.grid_step();
    let mut top_left = top_left_from_center(proposed_center, &bbox);
    match matches.x {
        Some(c) => top_left.x += c.delta,
        None => top_left.x = round_to_step(top_left.x, step),
    }
    match matches.y {
        Some(c) => top_left.y += c.delta,
        None => top_left.y = round_to_step(top_left.y, step),
    }

    let center = center_from_top_left(top_left, &bbox);
    let center = Point::new(round_mm(center.x), round_mm(center.y));
    let guide = matches.guide();

    debug!(
        "snap_move {}: ({:.1}, {:.1}) -> ({}, {}) x={:?} y={:?}",
        id,
        proposed_center.x,
        proposed_center.y,
        center.x,
        center.y,
        guide.x.map(|s| s.kind),
        guide.y.map(|s| s.kind)
    );

    Some(MoveSnap { center, guide })
}

/// Snaps a corner drag on object `id`.
///
/// The opposite corner of the wing-inclusive footprint stays fixed. Pointer
/// motion is measured in the object's local frame so length and width only
/// grow along their own axes, and neither drops below `min_size_mm`.
///
/// Returns `None` when `id` is not in the snapshot.
pub fn snap_resize(
    snapshot: &Snapshot,
    id: &ObjectId,
    corner: Corner,
    pointer: Point,
    options: &SnapOptions,
) -> Option<ResizeSnap> {
    let obj = snapshot.object(id)?;
    let rotation = f64::from(obj.rotation_deg());
    let (left_wing, right_wing) = obj.wing_extents();
    let wings = left_wing + right_wing;
    let (sign_x, sign_y) = corner.signs();
    let min_size = options.min_size_mm;

    let footprint = local_footprint(obj, true);
    let anchor_local = Point::new(
        if sign_x > 0.0 {
            footprint.min_x
        } else {
            footprint.max_x
        },
        if sign_y > 0.0 {
            footprint.min_y
        } else {
            footprint.max_y
        },
    );
    let anchor = obj.center() + rotate_point(anchor_local, rotation);

    let local = rotate_point(pointer - anchor, -rotation);
    let raw_length = (sign_x * local.x - wings).max(min_size);
    let raw_width = (sign_y * local.y).max(min_size);

    let moving_corner = |length: f64, width: f64| {
        anchor + rotate_point(Point::new(sign_x * (length + wings), sign_y * width), rotation)
    };

    let matches = if snapshot.snap_to_objects {
        let corner_point = moving_corner(raw_length, raw_width);
        let faces_x = [corner_point.x];
        let faces_y = [corner_point.y];
        let points = [corner_point];
        let probe = Probe {
            faces_x: &faces_x,
            faces_y: &faces_y,
            points: &points,
        };
        search(&probe, &other_rects(snapshot, id), options.threshold_mm)
    } else {
        AxisMatches::default()
    };

    // World x drives the length when the length axis is closer to horizontal
    let angle = rotation.to_radians();
    let length_along_x = angle.cos().abs() >= angle.sin().abs();
    let (length_match, width_match) = if length_along_x {
        (matches.x, matches.y)
    } else {
        (matches.y, matches.x)
    };

    let snapped_corner = {
        let mut p = moving_corner(raw_length, raw_width);
        if let Some(c) = matches.x {
            p.x += c.delta;
        }
        if let Some(c) = matches.y {
            p.y += c.delta;
        }
        p
    };
    let snapped_local = rotate_point(snapped_corner - anchor, -rotation);

    let step = snapshot.grid_step();
    let length = match length_match {
        Some(_) => sign_x * snapped_local.x - wings,
        None => round_to_step(raw_length, step),
    }
    .max(min_size);
    let width = match width_match {
        Some(_) => sign_y * snapped_local.y,
        None => round_to_step(raw_width, step),
    }
    .max(min_size);

    let center_local = Point::new(
        sign_x * (length + wings) / 2.0 - (right_wing - left_wing) / 2.0,
        sign_y * width / 2.0,
    );
    let center = anchor + rotate_point(center_local, rotation);
    let center = Point::new(round_mm(center.x), round_mm(center.y));
    let guide = matches.guide();

    debug!(
        "snap_resize {} {:?}: {}x{} at ({}, {})",
        id,
        corner,
        round_mm(length),
        round_mm(width),
        center.x,
        center.y
    );

    Some(ResizeSnap {
        length_mm: round_mm(length),
        width_mm: round_mm(width),
        center,
        guide,
    })
}
