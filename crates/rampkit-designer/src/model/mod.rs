//! Layout object model: points, measurement keys and anchors, and the
//! `Object2D` sum type over ramps and landings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use rampkit_core::constants::DEFAULT_ANCHOR_OFFSET_MM;
use rampkit_core::ObjectId;

mod landing;
mod ramp;

pub use landing::LandingObj;
pub use ramp::RampObj;

/// A point or vector in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Toggleable measurement of an object.
///
/// Declaration order is the canonical order used for iteration,
/// serialisation and dimension output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeasurementKey {
    /// Near length edge
    L1,
    /// Far length edge
    L2,
    /// Near width edge
    W1,
    /// Far width edge
    W2,
    /// Left wing span
    WL,
    /// Right wing span
    WR,
    /// Height callout
    H,
    /// Elevation callout
    E,
}

impl MeasurementKey {
    pub const ALL: [MeasurementKey; 8] = [
        MeasurementKey::L1,
        MeasurementKey::L2,
        MeasurementKey::W1,
        MeasurementKey::W2,
        MeasurementKey::WL,
        MeasurementKey::WR,
        MeasurementKey::H,
        MeasurementKey::E,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::W1 => "W1",
            Self::W2 => "W2",
            Self::WL => "WL",
            Self::WR => "WR",
            Self::H => "H",
            Self::E => "E",
        }
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested orientation of a dimension line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorOrientation {
    Horizontal,
    Vertical,
    /// Follows the owning object's rotation.
    #[default]
    Auto,
}

/// Placement of one measurement's dimension line relative to its object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementAnchor {
    pub offset_mm: f64,
    #[serde(default)]
    pub orientation: AnchorOrientation,
}

impl MeasurementAnchor {
    pub fn new(offset_mm: f64, orientation: AnchorOrientation) -> Self {
        Self {
            offset_mm,
            orientation,
        }
    }
}

impl Default for MeasurementAnchor {
    fn default() -> Self {
        Self {
            offset_mm: DEFAULT_ANCHOR_OFFSET_MM,
            orientation: AnchorOrientation::Auto,
        }
    }
}

/// Visibility toggle per measurement key.
pub type Measurements = BTreeMap<MeasurementKey, bool>;

/// Anchor per measurement key.
pub type MeasurementAnchors = BTreeMap<MeasurementKey, MeasurementAnchor>;

/// Measurement map with every key present, the listed ones switched on.
pub fn measurements_with(enabled: &[MeasurementKey]) -> Measurements {
    MeasurementKey::ALL
        .iter()
        .map(|key| (*key, enabled.contains(key)))
        .collect()
}

/// Anchor map with every key at the default anchor.
pub fn default_anchors() -> MeasurementAnchors {
    MeasurementKey::ALL
        .iter()
        .map(|key| (*key, MeasurementAnchor::default()))
        .collect()
}

/// Fields shared by every object kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseObj {
    pub id: ObjectId,
    /// Centre x
    pub x_mm: i64,
    /// Centre y
    pub y_mm: i64,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub elevation_mm: u32,
    /// Whole degrees in `[0, 360)`
    pub rotation_deg: u16,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub measurements: Measurements,
    #[serde(default)]
    pub measurement_anchors: MeasurementAnchors,
}

impl BaseObj {
    pub(crate) fn at(id: ObjectId, center: Point, length_mm: u32, width_mm: u32) -> Self {
        Self {
            id,
            x_mm: rampkit_core::round_mm(center.x) as i64,
            y_mm: rampkit_core::round_mm(center.y) as i64,
            length_mm,
            width_mm,
            height_mm: 0,
            elevation_mm: 0,
            rotation_deg: 0,
            locked: false,
            measurements: measurements_with(&[MeasurementKey::L1, MeasurementKey::W1]),
            measurement_anchors: default_anchors(),
        }
    }

    /// Whether a measurement is switched on; missing keys read as off.
    pub fn measurement_enabled(&self, key: MeasurementKey) -> bool {
        self.measurements.get(&key).copied().unwrap_or(false)
    }

    /// Anchor for a measurement; missing keys read as the default anchor.
    pub fn anchor(&self, key: MeasurementKey) -> MeasurementAnchor {
        self.measurement_anchors
            .get(&key)
            .copied()
            .unwrap_or_default()
    }
}

/// Discriminant of [`Object2D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Ramp,
    Landing,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ramp => "ramp",
            Self::Landing => "landing",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layout element on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Object2D {
    Ramp(RampObj),
    Landing(LandingObj),
}

impl Object2D {
    /// Creates a ramp centred on `center` with the default proportions.
    pub fn new_ramp(ids: &mut dyn rampkit_core::IdGenerator, center: Point) -> Self {
        Object2D::Ramp(RampObj::new(ids.next_id(ObjectKind::Ramp.as_str()), center))
    }

    /// Creates a landing centred on `center` with the default proportions.
    pub fn new_landing(ids: &mut dyn rampkit_core::IdGenerator, center: Point) -> Self {
        Object2D::Landing(LandingObj::new(
            ids.next_id(ObjectKind::Landing.as_str()),
            center,
        ))
    }

    /// Creates an object of the given kind.
    pub fn new_of_kind(
        kind: ObjectKind,
        ids: &mut dyn rampkit_core::IdGenerator,
        center: Point,
    ) -> Self {
        match kind {
            ObjectKind::Ramp => Self::new_ramp(ids, center),
            ObjectKind::Landing => Self::new_landing(ids, center),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object2D::Ramp(_) => ObjectKind::Ramp,
            Object2D::Landing(_) => ObjectKind::Landing,
        }
    }

    pub fn base(&self) -> &BaseObj {
        match self {
            Object2D::Ramp(r) => &r.base,
            Object2D::Landing(l) => &l.base,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut BaseObj {
        match self {
            Object2D::Ramp(r) => &mut r.base,
            Object2D::Landing(l) => &mut l.base,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.base().id
    }

    pub fn center(&self) -> Point {
        let base = self.base();
        Point::new(base.x_mm as f64, base.y_mm as f64)
    }

    pub fn rotation_deg(&self) -> u16 {
        self.base().rotation_deg
    }

    pub fn is_locked(&self) -> bool {
        self.base().locked
    }

    pub fn as_ramp(&self) -> Option<&RampObj> {
        match self {
            Object2D::Ramp(r) => Some(r),
            Object2D::Landing(_) => None,
        }
    }

    /// Effective `(left, right)` wing extensions along the length axis.
    /// Landings and disabled wings contribute nothing.
    pub fn wing_extents(&self) -> (f64, f64) {
        match self {
            Object2D::Ramp(r) => (
                if r.has_left_wing {
                    f64::from(r.left_wing_size_mm)
                } else {
                    0.0
                },
                if r.has_right_wing {
                    f64::from(r.right_wing_size_mm)
                } else {
                    0.0
                },
            ),
            Object2D::Landing(_) => (0.0, 0.0),
        }
    }
}
