use bevy::prelude::*;

use crate::config::{BuildConfig, DragBehavior};
use crate::events::{
    BuildModeChanged, CancelSelection, ChangeLevel, DemolishRequest, DemolitionModeChanged,
    FillRequest, LevelChanged, MenuToggled, ObjectDemolished, ObjectPlaced, PlaceRequest,
    PointerMoved, PointerPressed, PointerReleased, RotateSelection, SelectPrototype,
    ToggleBuildMode, ToggleDemolitionMode, ToggleMenu,
};
use crate::footprint::snap_offsets;
use crate::grid::LevelStack;
use crate::notifications::NotificationEvent;
use crate::picking::pick_level_plane;
use crate::prototypes::PrototypeLibrary;
use crate::registry::ObjectRegistry;
use crate::site;
use crate::visuals::{CommandsSpawner, ModelCatalog, VisualSpawner};

use super::state::{BuildMode, CursorRay};

/// Turn off the demolition preview of whatever is hovered.
fn clear_hover(
    mode: &mut BuildMode,
    registry: &mut ObjectRegistry,
    visuals: &mut impl VisualSpawner,
) {
    if let Some(id) = mode.hovered.take() {
        site::set_demolition_preview(registry, id, false, visuals);
    }
}

// =============================================================================
// Input phase
// =============================================================================

#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_selection_requests(
    mut selects: EventReader<SelectPrototype>,
    mut rotations: EventReader<RotateSelection>,
    mut cancels: EventReader<CancelSelection>,
    library: Res<PrototypeLibrary>,
    mut mode: ResMut<BuildMode>,
    mut registry: ResMut<ObjectRegistry>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut build_changed: EventWriter<BuildModeChanged>,
    mut demolition_changed: EventWriter<DemolitionModeChanged>,
) {
    for event in selects.read() {
        let Some(prototype) = library.get(event.index) else {
            warn!("SelectPrototype: no prototype at index {}", event.index);
            continue;
        };
        if mode.demolish_active {
            mode.demolish_active = false;
            let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
            clear_hover(&mut mode, &mut registry, &mut visuals);
            demolition_changed.send(DemolitionModeChanged { active: false });
        }
        if !mode.build_active {
            mode.build_active = true;
            build_changed.send(BuildModeChanged { active: true });
        }
        mode.select(event.index);
        info!("Selected '{}'", prototype.name);
    }

    let menu_open = mode.menu_open;
    for _ in rotations.read() {
        if !menu_open && mode.rotate() {
            debug!("Rotation is now {}", mode.rotation());
        }
    }
    for _ in cancels.read() {
        if !menu_open && mode.selected().is_some() {
            mode.clear_selection();
            debug!("Selection cancelled");
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_mode_toggles(
    mut build_toggles: EventReader<ToggleBuildMode>,
    mut demolition_toggles: EventReader<ToggleDemolitionMode>,
    mut menu_toggles: EventReader<ToggleMenu>,
    mut mode: ResMut<BuildMode>,
    mut registry: ResMut<ObjectRegistry>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut build_changed: EventWriter<BuildModeChanged>,
    mut demolition_changed: EventWriter<DemolitionModeChanged>,
    mut menu_toggled: EventWriter<MenuToggled>,
) {
    for _ in menu_toggles.read() {
        mode.menu_open = !mode.menu_open;
        mode.drag.reset();
        menu_toggled.send(MenuToggled {
            open: mode.menu_open,
        });
    }

    for _ in build_toggles.read() {
        mode.build_active = !mode.build_active;
        if !mode.build_active {
            mode.clear_selection();
        }
        info!("Build mode {}", if mode.build_active { "on" } else { "off" });
        build_changed.send(BuildModeChanged {
            active: mode.build_active,
        });
    }

    for _ in demolition_toggles.read() {
        mode.demolish_active = !mode.demolish_active;
        if mode.demolish_active {
            mode.clear_selection();
        } else {
            let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
            clear_hover(&mut mode, &mut registry, &mut visuals);
        }
        info!(
            "Demolition mode {}",
            if mode.demolish_active { "on" } else { "off" }
        );
        demolition_changed.send(DemolitionModeChanged {
            active: mode.demolish_active,
        });
    }
}

pub(crate) fn handle_level_change(
    mut requests: EventReader<ChangeLevel>,
    mode: Res<BuildMode>,
    mut levels: ResMut<LevelStack>,
    mut changed: EventWriter<LevelChanged>,
) {
    for request in requests.read() {
        if mode.menu_open || request.direction == 0 {
            continue;
        }
        let level = levels.activate_next(request.direction);
        let height = levels.active().origin().y;
        info!("Active level is now {level} (y = {height})");
        changed.send(LevelChanged { level, height });
    }
}

// =============================================================================
// Cursor phase
// =============================================================================

/// Project the cursor onto the active level, snap the selection and refresh
/// collision and demolition feedback.
#[allow(clippy::too_many_arguments)]
pub(crate) fn update_cursor_target(
    ray: Res<CursorRay>,
    config: Res<BuildConfig>,
    library: Res<PrototypeLibrary>,
    levels: Res<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut mode: ResMut<BuildMode>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
) {
    if !mode.accepts_input() {
        return;
    }
    let mut visuals = CommandsSpawner::new(&mut commands, &catalog);

    let Some(ray) = ray.0 else {
        mode.cursor = None;
        mode.snapped = None;
        clear_hover(&mut mode, &mut registry, &mut visuals);
        return;
    };
    let level = levels.active();
    mode.cursor = pick_level_plane(ray, level);

    if mode.demolish_active {
        let target = registry.pick(ray, config.demolish_layers());
        if target != mode.hovered {
            clear_hover(&mut mode, &mut registry, &mut visuals);
            if let Some(id) = target {
                site::set_demolition_preview(&mut registry, id, true, &mut visuals);
                mode.hovered = Some(id);
            }
        }
        return;
    }

    let selected = mode.selected().and_then(|index| library.get(index));
    let (Some(prototype), Some(cursor)) = (selected, mode.cursor) else {
        mode.snapped = None;
        mode.placement_blocked = false;
        return;
    };
    let yaw = mode.yaw();
    if prototype.snap.is_grid_bound() {
        let (has_x_offset, has_z_offset) = snap_offsets(prototype);
        let snapped = level.snap_cursor(cursor, has_x_offset, has_z_offset, yaw);
        mode.placement_blocked = level.check_footprint(prototype, yaw, snapped).is_err();
        mode.snapped = Some(snapped);
    } else {
        mode.snapped = Some(site::free_position(&levels, cursor));
        mode.placement_blocked = false;
    }
}

/// Turn primary-button input into placement requests according to the
/// configured drag behavior.
#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_pointer(
    mut presses: EventReader<PointerPressed>,
    mut moves: EventReader<PointerMoved>,
    mut releases: EventReader<PointerReleased>,
    config: Res<BuildConfig>,
    mut mode: ResMut<BuildMode>,
    mut place: EventWriter<PlaceRequest>,
    mut fill: EventWriter<FillRequest>,
    mut demolish: EventWriter<DemolishRequest>,
) {
    let behavior = config.drag_behavior;

    for press in presses.read() {
        if mode.accepts_input() && mode.demolish_active {
            demolish.send(DemolishRequest::default());
            continue;
        }
        if !mode.can_place() {
            continue;
        }
        if behavior == DragBehavior::None {
            place.send(PlaceRequest);
            continue;
        }
        mode.drag.pressed_at = Some(press.screen);
        if behavior == DragBehavior::DelayedPlacement {
            mode.drag.start = mode.cursor;
        }
    }

    let mut dragged = false;
    for motion in moves.read() {
        if !mode.drag.is_pressed() || behavior == DragBehavior::None {
            continue;
        }
        if mode.drag.distance_from_press(motion.screen) < config.drag_threshold {
            continue;
        }
        match behavior {
            DragBehavior::InstantPlacement => dragged = true,
            DragBehavior::DelayedPlacement => mode.drag.end = mode.cursor,
            DragBehavior::None => {}
        }
    }
    if dragged && mode.can_place() {
        place.send(PlaceRequest);
    }

    for release in releases.read() {
        if !mode.drag.is_pressed() {
            continue;
        }
        if mode.drag.distance_from_press(release.screen) < config.drag_threshold {
            if mode.can_place() {
                place.send(PlaceRequest);
            }
        } else if behavior == DragBehavior::DelayedPlacement {
            if let Some(end) = mode.cursor {
                mode.drag.end = Some(end);
            }
            if let Some((from, to)) = mode.drag.rectangle() {
                fill.send(FillRequest { from, to });
            }
        }
        mode.drag.reset();
    }
}

// =============================================================================
// Apply phase
// =============================================================================

#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_place_requests(
    mut requests: EventReader<PlaceRequest>,
    mut mode: ResMut<BuildMode>,
    library: Res<PrototypeLibrary>,
    mut levels: ResMut<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut placed: EventWriter<ObjectPlaced>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for _ in requests.read() {
        if !mode.can_place() {
            continue;
        }
        let (Some(prototype), Some(position)) = (
            mode.selected().and_then(|index| library.get(index)),
            mode.snapped,
        ) else {
            continue;
        };
        let yaw = mode.yaw();
        let level = levels.active_index();
        let mut visuals = CommandsSpawner::new(&mut commands, &catalog);

        let result = if prototype.snap.is_grid_bound() {
            site::try_place(
                &mut levels,
                &mut registry,
                level,
                prototype,
                yaw,
                position,
                &mut visuals,
            )
            .map(|outcome| outcome.placed().map(|id| (id, Some(level))))
        } else {
            let layer = levels.active().layer_for(prototype.snap);
            site::place_free(&mut registry, prototype, position, yaw, layer, &mut visuals)
                .map(|id| Some((id, None)))
        };

        match result {
            Ok(Some((id, level))) => {
                debug!("Placed '{}' at {position}", prototype.name);
                if level.is_some() {
                    mode.placement_blocked = true;
                }
                placed.send(ObjectPlaced {
                    id,
                    prototype: prototype.name.clone(),
                    level,
                });
            }
            Ok(None) => {}
            Err(err) => {
                error!("Failed to place '{}': {err}", prototype.name);
                notifications
                    .send(NotificationEvent::error(err.to_string()).at(position.x, position.z));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn handle_fill_requests(
    mut requests: EventReader<FillRequest>,
    mode: Res<BuildMode>,
    library: Res<PrototypeLibrary>,
    mut levels: ResMut<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut placed: EventWriter<ObjectPlaced>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for request in requests.read() {
        if !mode.can_place() {
            continue;
        }
        let Some(prototype) = mode.selected().and_then(|index| library.get(index)) else {
            continue;
        };
        if !prototype.snap.is_grid_bound() {
            debug!("Fill ignored for free object '{}'", prototype.name);
            continue;
        }
        let level = levels.active_index();
        let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
        match site::fill_rectangle(
            &mut levels,
            &mut registry,
            level,
            prototype,
            mode.yaw(),
            request.from,
            request.to,
            &mut visuals,
        ) {
            Ok(ids) => {
                debug!("Filled {} x '{}' on level {level}", ids.len(), prototype.name);
                for id in ids {
                    placed.send(ObjectPlaced {
                        id,
                        prototype: prototype.name.clone(),
                        level: Some(level),
                    });
                }
            }
            Err(err) => {
                error!("Failed to fill with '{}': {err}", prototype.name);
                let center = (request.from + request.to) * 0.5;
                notifications.send(NotificationEvent::error(err.to_string()).at(center.x, center.z));
            }
        }
    }
}

/// Demolish the requested object, or the hovered one in demolition mode.
pub(crate) fn handle_demolish_requests(
    mut requests: EventReader<DemolishRequest>,
    mut mode: ResMut<BuildMode>,
    mut levels: ResMut<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut demolished: EventWriter<ObjectDemolished>,
) {
    for request in requests.read() {
        let target = match request.target {
            Some(id) => Some(id),
            None if mode.accepts_input() && mode.demolish_active => mode.hovered,
            None => None,
        };
        let Some(id) = target else {
            continue;
        };
        if mode.hovered == Some(id) {
            mode.hovered = None;
        }
        let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
        if let Some(object) = site::demolish(&mut levels, &mut registry, id, &mut visuals) {
            debug!("Demolished '{}'", object.prototype.name);
            demolished.send(ObjectDemolished {
                id,
                prototype: object.prototype.name,
            });
        }
    }
}
