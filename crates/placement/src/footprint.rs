//! Footprint geometry shared by placement, colliders, previews and snapping.

use bevy::prelude::*;

use crate::config::{FLOOR_THICKNESS, ROTATION_EPSILON, WALL_THICKNESS};
use crate::prototypes::{BuildablePrototype, SnapCategory};

/// Size used for free objects whose visual bounds are unknown.
pub const FALLBACK_FREE_SIZE: Vec3 = Vec3::ONE;

/// Wrap a yaw in degrees into (-180, 180].
pub fn normalize_yaw(degrees: f32) -> f32 {
    let mut yaw = degrees.rem_euclid(360.0);
    if yaw > 180.0 {
        yaw -= 360.0;
    }
    yaw
}

/// True when the yaw faces along the X axis (90 or -90 after normalization),
/// which swaps the footprint's x and z extents.
pub fn is_quarter_turn(y_rotation_degrees: f32) -> bool {
    (normalize_yaw(y_rotation_degrees).abs() - 90.0).abs() <= ROTATION_EPSILON
}

/// World-space size of a prototype's body. Free objects take the bounds of
/// their instantiated visual when known.
pub fn world_size(prototype: &BuildablePrototype, free_bounds: Option<Vec3>) -> Vec3 {
    let size = prototype.size.as_vec3();
    match prototype.snap {
        SnapCategory::Ground => Vec3::new(size.x, FLOOR_THICKNESS, size.z),
        SnapCategory::Wall => Vec3::new(size.x, size.y, WALL_THICKNESS),
        SnapCategory::Free => free_bounds.unwrap_or(FALLBACK_FREE_SIZE),
    }
}

/// Number of cells the prototype covers along (x, z) at the given yaw.
///
/// A zero extent (walls have no z depth) still covers one cell.
pub fn footprint_cells(prototype: &BuildablePrototype, y_rotation_degrees: f32) -> (i32, i32) {
    let (x, z) = if is_quarter_turn(y_rotation_degrees) {
        (prototype.size.z, prototype.size.x)
    } else {
        (prototype.size.x, prototype.size.z)
    };
    (x.max(1), z.max(1))
}

/// Local offset of the collider and the demolition preview relative to the
/// object's origin. Walls stand on the level floor, so their box is lifted by
/// half its height.
pub fn collider_offset(prototype: &BuildablePrototype) -> Vec3 {
    match prototype.snap {
        SnapCategory::Wall => Vec3::new(0.0, prototype.size.y as f32 / 2.0, 0.0),
        SnapCategory::Ground | SnapCategory::Free => Vec3::ZERO,
    }
}

/// Odd footprint axes need a half-cell nudge when snapping so the object
/// centers on a cell instead of a grid line.
pub fn snap_offsets(prototype: &BuildablePrototype) -> (bool, bool) {
    (prototype.size.x % 2 != 0, prototype.size.z % 2 != 0)
}

/// World-space axis-aligned half extents of the collider after rotation.
/// Only quarter turns are meaningful for grid pieces; other yaws keep the
/// unrotated box.
pub fn rotated_half_extents(size: Vec3, y_rotation_degrees: f32) -> Vec3 {
    let half = size * 0.5;
    if is_quarter_turn(y_rotation_degrees) {
        Vec3::new(half.z, half.y, half.x)
    } else {
        half
    }
}
