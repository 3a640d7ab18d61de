use std::f32::consts::TAU;

use super::types::{HotspotId, HotspotState};

/// Idle rotation per frame, in radians.
pub const ROTATION_STEP: f32 = 0.005;

/// Hover and selection state of one mounted device model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotViewer {
    hovered: Option<HotspotId>,
    selected: Option<HotspotId>,
    rotation: f32,
}

impl HotspotViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<HotspotId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<HotspotId> {
        self.selected
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn state_of(&self, id: HotspotId) -> HotspotState {
        if self.selected == Some(id) {
            HotspotState::Selected
        } else if self.hovered == Some(id) {
            HotspotState::Hovered
        } else {
            HotspotState::Idle
        }
    }

    pub fn tooltip_visible(&self, id: HotspotId) -> bool {
        self.state_of(id) != HotspotState::Idle
    }

    pub fn pointer_enter(&mut self, id: HotspotId) {
        self.hovered = Some(id);
    }

    /// Leaving a hotspot drops its hover; a selection survives.
    pub fn pointer_leave(&mut self, id: HotspotId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }

    /// Select `id`, or deselect it if it already was.
    pub fn click(&mut self, id: HotspotId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Close button on an open tooltip.
    pub fn close(&mut self, id: HotspotId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Click on the model body rather than a hotspot.
    pub fn click_background(&mut self) {
        self.selected = None;
    }

    pub fn is_rotating(&self) -> bool {
        self.selected.is_none()
    }

    /// Advance one animation frame. Rotation holds while something is selected.
    pub fn tick(&mut self) -> f32 {
        if self.is_rotating() {
            self.rotation = (self.rotation + ROTATION_STEP).rem_euclid(TAU);
        }
        self.rotation
    }

    /// The model went away; hover and selection go with it.
    pub fn unmount(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}
