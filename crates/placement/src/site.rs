//! Operations that touch both the level grids and the object registry.
//!
//! Placement always validates the whole footprint before anything is written:
//! a rejected or failed placement leaves grid occupancy, the registry and the
//! visual world exactly as they were.

use bevy::prelude::*;

use crate::construction_error::ConstructionError;
use crate::footprint::{footprint_cells, world_size};
use crate::grid::{LevelStack, Rejection};
use crate::prototypes::BuildablePrototype;
use crate::registry::{ObjectId, ObjectRegistry, PlacedObject};
use crate::visuals::VisualSpawner;

/// Result of a placement attempt that did not hit a construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed(ObjectId),
    Rejected(Rejection),
}

impl PlaceOutcome {
    pub fn placed(self) -> Option<ObjectId> {
        match self {
            PlaceOutcome::Placed(id) => Some(id),
            PlaceOutcome::Rejected(_) => None,
        }
    }

    pub fn is_placed(self) -> bool {
        matches!(self, PlaceOutcome::Placed(_))
    }
}

// =============================================================================
// Placement
// =============================================================================

/// Place a grid-bound prototype on `level` at an already snapped `position`.
pub fn try_place(
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    level: usize,
    prototype: &BuildablePrototype,
    y_rotation: f32,
    position: Vec3,
    visuals: &mut impl VisualSpawner,
) -> Result<PlaceOutcome, ConstructionError> {
    let Some(grid) = levels.get(level) else {
        debug!("try_place: level {level} does not exist");
        return Ok(PlaceOutcome::Rejected(Rejection::UnknownLevel(level)));
    };

    let footprint = match grid.check_footprint(prototype, y_rotation, position) {
        Ok(footprint) => footprint,
        Err(rejection) => {
            debug!("Placement of '{}' rejected: {rejection}", prototype.name);
            return Ok(PlaceOutcome::Rejected(rejection));
        }
    };
    let layer = grid.layer_for(prototype.snap);

    let transform = Transform::from_translation(position)
        .with_rotation(Quat::from_rotation_y(y_rotation.to_radians()));
    let visual = visuals.spawn_visual(prototype, transform)?;
    let collider_size = world_size(prototype, visuals.visual_bounds(prototype));

    let id = registry.insert(PlacedObject::new(
        prototype.clone(),
        position,
        y_rotation,
        Some(level),
        layer,
        collider_size,
        visual,
    ));

    if let (Some(grid), Some(object)) = (levels.get_mut(level), registry.get_mut(id)) {
        for cell in grid.link(id, &footprint) {
            object.add_cell(cell);
        }
    }
    Ok(PlaceOutcome::Placed(id))
}

/// Horizontal cursor position lifted to the active level's floor.
pub fn free_position(levels: &LevelStack, cursor: Vec3) -> Vec3 {
    Vec3::new(cursor.x, levels.active().origin().y, cursor.z)
}

/// Place an object that is not bound to any cell.
pub fn place_free(
    registry: &mut ObjectRegistry,
    prototype: &BuildablePrototype,
    position: Vec3,
    y_rotation: f32,
    layer: u32,
    visuals: &mut impl VisualSpawner,
) -> Result<ObjectId, ConstructionError> {
    let transform = Transform::from_translation(position)
        .with_rotation(Quat::from_rotation_y(y_rotation.to_radians()));
    let visual = visuals.spawn_visual(prototype, transform)?;
    let collider_size = world_size(prototype, visuals.visual_bounds(prototype));
    Ok(registry.insert(PlacedObject::new(
        prototype.clone(),
        position,
        y_rotation,
        None,
        layer,
        collider_size,
        visual,
    )))
}

/// Cover the rectangle of cells between two world points with copies of
/// `prototype`, stepping by its footprint. Cells that are already taken are
/// skipped. Returns the ids of everything placed.
#[allow(clippy::too_many_arguments)]
pub fn fill_rectangle(
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    level: usize,
    prototype: &BuildablePrototype,
    y_rotation: f32,
    from: Vec3,
    to: Vec3,
    visuals: &mut impl VisualSpawner,
) -> Result<Vec<ObjectId>, ConstructionError> {
    let Some(grid) = levels.get(level) else {
        return Ok(Vec::new());
    };
    let (x_len, z_len) = footprint_cells(prototype, y_rotation);
    let a = grid.world_to_grid(from);
    let b = grid.world_to_grid(to);
    let min = a.min(b);
    let max = a.max(b);

    let mut positions = Vec::new();
    let mut ix = min.x;
    while ix + x_len - 1 <= max.x {
        let mut iz = min.y;
        while iz + z_len - 1 <= max.y {
            positions.push(grid.placement_point(IVec2::new(ix, iz), x_len, z_len));
            iz += z_len;
        }
        ix += x_len;
    }

    let mut placed = Vec::new();
    for position in positions {
        let outcome = try_place(levels, registry, level, prototype, y_rotation, position, visuals)?;
        if let Some(id) = outcome.placed() {
            placed.push(id);
        }
    }
    Ok(placed)
}

// =============================================================================
// Demolition
// =============================================================================

/// Unlink an object from every cell it occupies, release its visual and
/// invalidate its id. Stale ids are a no-op and return `None`.
pub fn demolish(
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    id: ObjectId,
    visuals: &mut impl VisualSpawner,
) -> Option<PlacedObject> {
    let object = registry.remove(id)?;
    for cell in &object.cells {
        if let Some(level) = levels.get_mut(cell.level) {
            level.unlink(id, cell.index);
        }
    }
    visuals.despawn_visual(object.visual);
    Some(object)
}

/// Toggle the demolition preview of an object and its visual.
pub fn set_demolition_preview(
    registry: &mut ObjectRegistry,
    id: ObjectId,
    enabled: bool,
    visuals: &mut impl VisualSpawner,
) {
    if let Some(visual) = registry.set_demolition_preview(id, enabled) {
        visuals.set_demolition_preview(visual, enabled);
    }
}

/// Demolish every occupant of one level. Multi-cell objects are destroyed
/// once. Returns how many objects were removed.
pub fn reset_level(
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    level: usize,
    visuals: &mut impl VisualSpawner,
) -> usize {
    let Some(grid) = levels.get(level) else {
        return 0;
    };
    let occupants = grid.occupants();
    occupants
        .into_iter()
        .filter(|id| demolish(levels, registry, *id, visuals).is_some())
        .count()
}

/// Demolish every free object and every occupant of every level.
pub fn reset_all(
    levels: &mut LevelStack,
    registry: &mut ObjectRegistry,
    visuals: &mut impl VisualSpawner,
) -> usize {
    let free: Vec<ObjectId> = registry.free_objects().to_vec();
    let mut removed = free
        .into_iter()
        .filter(|id| demolish(levels, registry, *id, visuals).is_some())
        .count();
    for level in 0..levels.len() {
        removed += reset_level(levels, registry, level, visuals);
    }
    removed
}
