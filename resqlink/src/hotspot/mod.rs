mod catalog;
mod types;
mod viewer;

pub use catalog::{RQL_X1_HOTSPOTS, anchor, annotation};
pub use types::{HotspotAnnotation, HotspotId, HotspotState, PartPlacement, Vec3};
pub use viewer::{HotspotViewer, ROTATION_STEP};
