//! Typed messages between input, the placement engine and its observers.
//!
//! Requests are sent by the input layer (or tests) and consumed by the
//! build-mode systems. Notifications are sent after state changed; any number
//! of readers may observe them.

use bevy::prelude::*;

use crate::registry::ObjectId;

// =============================================================================
// Requests
// =============================================================================

/// Place the selected prototype at the current snapped cursor position.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlaceRequest;

/// Demolish `target`, or the hovered object when `None`.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DemolishRequest {
    pub target: Option<ObjectId>,
}

/// Cover the cells between two world points with the selected prototype.
#[derive(Event, Debug, Clone, Copy)]
pub struct FillRequest {
    pub from: Vec3,
    pub to: Vec3,
}

/// Move the active level by `direction` (wrapping).
#[derive(Event, Debug, Clone, Copy)]
pub struct ChangeLevel {
    pub direction: i32,
}

/// Select the prototype at `index` in the library.
#[derive(Event, Debug, Clone, Copy)]
pub struct SelectPrototype {
    pub index: usize,
}

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleBuildMode;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleDemolitionMode;

/// Advance the selection's rotation by a quarter turn.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RotateSelection;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct CancelSelection;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ToggleMenu;

// =============================================================================
// Pointer
// =============================================================================

/// Primary pointer button went down at `screen` (window pixels).
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerPressed {
    pub screen: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PointerMoved {
    pub screen: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PointerReleased {
    pub screen: Vec2,
}

// =============================================================================
// Notifications
// =============================================================================

/// The active level changed. `height` is the level's world Y.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LevelChanged {
    pub level: usize,
    pub height: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildModeChanged {
    pub active: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemolitionModeChanged {
    pub active: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuToggled {
    pub open: bool,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ObjectPlaced {
    pub id: ObjectId,
    pub prototype: String,
    /// `None` for free objects.
    pub level: Option<usize>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ObjectDemolished {
    pub id: ObjectId,
    pub prototype: String,
}
