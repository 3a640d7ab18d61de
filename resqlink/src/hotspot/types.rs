use serde::{Deserialize, Serialize};

pub type Vec3 = [f32; 3];

/// Point of interest on the RQL-X1 model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotId {
    CoreProcessor,
    Antenna,
    Display,
    SosArray,
    PowerCell,
}

impl HotspotId {
    pub const ALL: [HotspotId; 5] = [
        HotspotId::CoreProcessor,
        HotspotId::Antenna,
        HotspotId::Display,
        HotspotId::SosArray,
        HotspotId::PowerCell,
    ];
}

/// Where a device part sits in the assembled and exploded views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPlacement {
    pub assembled: Vec3,
    pub exploded: Vec3,
    pub scale: Vec3,
}

impl PartPlacement {
    pub fn offset(&self, exploded: bool) -> Vec3 {
        if exploded {
            self.exploded
        } else {
            self.assembled
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotAnnotation {
    pub id: HotspotId,
    pub part: PartPlacement,
    /// Anchor in the part's local space.
    pub position: Vec3,
    pub label: &'static str,
    pub description: &'static str,
}

impl HotspotAnnotation {
    /// Model-space anchor for the current view.
    pub fn anchor(&self, exploded: bool) -> Vec3 {
        let offset = self.part.offset(exploded);
        let scale = self.part.scale;
        [
            offset[0] + scale[0] * self.position[0],
            offset[1] + scale[1] * self.position[1],
            offset[2] + scale[2] * self.position[2],
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotState {
    Idle,
    Hovered,
    Selected,
}
