use serde::{Deserialize, Serialize};

use rampkit_core::ObjectId;

use super::{BaseObj, Point};

const DEFAULT_RUN_MM: u32 = 2000;
const DEFAULT_WIDTH_MM: u32 = 1000;
const DEFAULT_HEIGHT_MM: u32 = 150;

/// A sloped ramp. The run is the length axis; optional wings extend the
/// footprint past the start (left) and end (right) of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampObj {
    #[serde(flatten)]
    pub base: BaseObj,
    /// Mirrors `base.length_mm`
    #[serde(default)]
    pub run_mm: u32,
    #[serde(default = "default_show_arrow")]
    pub show_arrow: bool,
    #[serde(default)]
    pub has_left_wing: bool,
    #[serde(default)]
    pub left_wing_size_mm: u32,
    #[serde(default)]
    pub has_right_wing: bool,
    #[serde(default)]
    pub right_wing_size_mm: u32,
}

fn default_show_arrow() -> bool {
    true
}

impl RampObj {
    pub fn new(id: ObjectId, center: Point) -> Self {
        let mut base = BaseObj::at(id, center, DEFAULT_RUN_MM, DEFAULT_WIDTH_MM);
        base.height_mm = DEFAULT_HEIGHT_MM;
        Self {
            base,
            run_mm: DEFAULT_RUN_MM,
            show_arrow: true,
            has_left_wing: false,
            left_wing_size_mm: 0,
            has_right_wing: false,
            right_wing_size_mm: 0,
        }
    }
}
