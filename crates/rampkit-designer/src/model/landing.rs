use serde::{Deserialize, Serialize};

use rampkit_core::ObjectId;

use super::{BaseObj, Point};

const DEFAULT_SIZE_MM: u32 = 1500;
const DEFAULT_HEIGHT_MM: u32 = 150;

/// A flat platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingObj {
    #[serde(flatten)]
    pub base: BaseObj,
}

impl LandingObj {
    pub fn new(id: ObjectId, center: Point) -> Self {
        let mut base = BaseObj::at(id, center, DEFAULT_SIZE_MM, DEFAULT_SIZE_MM);
        base.height_mm = DEFAULT_HEIGHT_MM;
        Self { base }
    }
}
