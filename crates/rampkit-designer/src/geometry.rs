//! Geometry kernel: rotation, footprints and bounding boxes.
//!
//! Everything here works on raw floating-point millimetres. Rounding is
//! applied only where results are stored on an object, so repeated
//! rotate/resize cycles do not accumulate drift.
//!
//! Screen convention: +x right, +y down. "Top" is the smaller y.

use crate::model::{Object2D, Point};

/// Rotates `p` about the origin by `angle_deg` degrees.
pub fn rotate_point(p: Point, angle_deg: f64) -> Point {
    let angle_rad = angle_deg.to_radians();
    let s = angle_rad.sin();
    let c = angle_rad.cos();
    Point {
        x: p.x * c - p.y * s,
        y: p.x * s + p.y * c,
    }
}

/// Unrotated rectangle in an object's local frame.
///
/// Local +x is the length (run) axis, local +y the width axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Footprint {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Corners clockwise from top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

/// Local footprint of `obj`.
///
/// Ramp wings extend the length axis: the left wing past the start (-x),
/// the right wing past the end (+x). With `include_wings` false only the
/// ramp body is returned, which is what edge dimensions measure.
pub fn local_footprint(obj: &Object2D, include_wings: bool) -> Footprint {
    let base = obj.base();
    let half_l = f64::from(base.length_mm) / 2.0;
    let half_w = f64::from(base.width_mm) / 2.0;
    let (left, right) = if include_wings {
        obj.wing_extents()
    } else {
        (0.0, 0.0)
    };
    Footprint {
        min_x: -half_l - left,
        max_x: half_l + right,
        min_y: -half_w,
        max_y: half_w,
    }
}

/// Axis-aligned extent of a point set, relative to the frame origin.
///
/// `offset_x`/`offset_y` locate the box centre. A rotated footprint with
/// asymmetric wings is not centred on the object's origin, so callers must
/// not assume a zero offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Min/max reduction of `points`. An empty slice yields the zero box.
pub fn bounding_box_from_points(points: &[Point]) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox::default();
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    BoundingBox {
        width: max_x - min_x,
        height: max_y - min_y,
        offset_x: (min_x + max_x) / 2.0,
        offset_y: (min_y + max_y) / 2.0,
    }
}

fn rotated_box(obj: &Object2D, include_wings: bool) -> BoundingBox {
    let angle = f64::from(obj.rotation_deg());
    let corners = local_footprint(obj, include_wings)
        .corners()
        .map(|c| rotate_point(c, angle));
    bounding_box_from_points(&corners)
}

/// World-aligned box of the rotated, wing-inclusive footprint, relative to
/// the object's centre. This is the footprint used by placement, snapping
/// and resizing.
pub fn object_bounding_box(obj: &Object2D) -> BoundingBox {
    rotated_box(obj, true)
}

/// Like [`object_bounding_box`] but without ramp wings.
pub fn body_bounding_box(obj: &Object2D) -> BoundingBox {
    rotated_box(obj, false)
}

/// Top-left corner of `bbox` for an object centred at `center`.
pub fn top_left_from_center(center: Point, bbox: &BoundingBox) -> Point {
    Point::new(
        center.x + bbox.offset_x - bbox.width / 2.0,
        center.y + bbox.offset_y - bbox.height / 2.0,
    )
}

/// Inverse of [`top_left_from_center`].
pub fn center_from_top_left(top_left: Point, bbox: &BoundingBox) -> Point {
    Point::new(
        top_left.x + bbox.width / 2.0 - bbox.offset_x,
        top_left.y + bbox.height / 2.0 - bbox.offset_y,
    )
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Places `bbox` for an object centred at `center`.
    pub fn at(center: Point, bbox: &BoundingBox) -> Self {
        let top_left = top_left_from_center(center, bbox);
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + bbox.width,
            max_y: top_left.y + bbox.height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Vertical faces: left, centre-x, right.
    pub fn faces_x(&self) -> [f64; 3] {
        [self.min_x, (self.min_x + self.max_x) / 2.0, self.max_x]
    }

    /// Horizontal faces: top, centre-y, bottom.
    pub fn faces_y(&self) -> [f64; 3] {
        [self.min_y, (self.min_y + self.max_y) / 2.0, self.max_y]
    }

    /// Corners, edge midpoints and centroid.
    pub fn points_of_interest(&self) -> [Point; 9] {
        let [left, cx, right] = self.faces_x();
        let [top, cy, bottom] = self.faces_y();
        [
            Point::new(left, top),
            Point::new(right, top),
            Point::new(right, bottom),
            Point::new(left, bottom),
            Point::new(cx, top),
            Point::new(right, cy),
            Point::new(cx, bottom),
            Point::new(left, cy),
            Point::new(cx, cy),
        ]
    }
}

/// World rectangle occupied by `obj` at its stored position.
pub fn object_rect(obj: &Object2D) -> Rect {
    Rect::at(obj.center(), &object_bounding_box(obj))
}

/// Rotated wing-inclusive outline in world coordinates, clockwise from the
/// local top-left corner.
pub fn world_outline(obj: &Object2D) -> [Point; 4] {
    let angle = f64::from(obj.rotation_deg());
    let center = obj.center();
    local_footprint(obj, true)
        .corners()
        .map(|c| rotate_point(c, angle) + center)
}
