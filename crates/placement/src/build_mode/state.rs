use bevy::prelude::*;

use crate::registry::ObjectId;

/// Quarter-turn step applied by `RotateSelection`.
pub const ROTATION_STEP: u16 = 90;

// =============================================================================
// CursorRay
// =============================================================================

/// World-space ray under the pointer, written each frame by whoever owns the
/// camera. `None` when the pointer is outside the window.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorRay(pub Option<Ray3d>);

impl CursorRay {
    /// Straight-down ray through `(x, z)`, starting `height` above the origin.
    pub fn vertical(x: f32, z: f32, height: f32) -> Self {
        Self(Some(Ray3d::new(Vec3::new(x, height, z), Dir3::NEG_Y)))
    }
}

// =============================================================================
// Drag
// =============================================================================

/// Primary-button drag in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Screen position where the button went down. `None` when released.
    pub pressed_at: Option<Vec2>,
    /// World cursor when the drag started (delayed placement only).
    pub start: Option<Vec3>,
    /// Latest world cursor beyond the threshold (delayed placement only).
    pub end: Option<Vec3>,
}

impl DragState {
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Screen distance from the press point, or zero when not pressed.
    pub fn distance_from_press(&self, screen: Vec2) -> f32 {
        self.pressed_at.map_or(0.0, |at| at.distance(screen))
    }

    /// Corners of the rectangle being dragged out.
    pub fn rectangle(&self) -> Option<(Vec3, Vec3)> {
        Some((self.start?, self.end?))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// BuildMode
// =============================================================================

/// Interaction state of the building tool.
#[derive(Resource, Debug, Clone, Default)]
pub struct BuildMode {
    pub build_active: bool,
    pub demolish_active: bool,
    /// While the menu is open no placement input is processed.
    pub menu_open: bool,
    selected: Option<usize>,
    rotation: u16,
    /// Raw cursor on the active level's plane.
    pub cursor: Option<Vec3>,
    /// Where the selection would be placed if committed now.
    pub snapped: Option<Vec3>,
    /// Whether committing at `snapped` would be rejected.
    pub placement_blocked: bool,
    /// Object under the cursor in demolition mode, shown with its preview on.
    pub hovered: Option<ObjectId>,
    pub drag: DragState,
}

impl BuildMode {
    /// Index of the selected prototype in the library.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Current rotation in degrees: 0, 90, 180 or 270.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn yaw(&self) -> f32 {
        f32::from(self.rotation)
    }

    /// Select a prototype. Rotation starts over at 0.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.rotation = 0;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.rotation = 0;
        self.snapped = None;
        self.placement_blocked = false;
        self.drag.reset();
    }

    /// Advance a quarter turn, 270 wraps to 0. Ignored without a selection.
    pub fn rotate(&mut self) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.rotation = (self.rotation + ROTATION_STEP) % 360;
        true
    }

    /// Cursor, placement and demolition input are only handled while a mode
    /// is on and the menu is closed.
    pub fn accepts_input(&self) -> bool {
        !self.menu_open && (self.build_active || self.demolish_active)
    }

    /// Whether a placement should be attempted for pointer input.
    pub fn can_place(&self) -> bool {
        self.accepts_input() && self.selected.is_some() && !self.demolish_active
    }
}
