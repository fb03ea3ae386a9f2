use bevy::prelude::*;

use placement::build_mode::CursorRay;
use placement::events::{
    CancelSelection, ChangeLevel, PointerMoved, PointerPressed, PointerReleased, RotateSelection,
    ToggleBuildMode, ToggleDemolitionMode, ToggleMenu,
};
use placement::keybindings::KeyBindings;

use crate::egui_input_guard::EguiCapture;

/// Write the world ray under the cursor for the placement engine. The ray is
/// cleared while the pointer is outside the window or over the UI.
pub fn update_cursor_ray(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    capture: Res<EguiCapture>,
    mut cursor: ResMut<CursorRay>,
) {
    let ray = if capture.pointer {
        None
    } else {
        ray_under_cursor(&windows, &camera_q)
    };
    cursor.0 = ray;
}

fn ray_under_cursor(
    windows: &Query<&Window>,
    camera_q: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.get_single().ok()?;
    let (camera, cam_transform) = camera_q.get_single().ok()?;
    let screen_pos = window.cursor_position()?;
    camera.viewport_to_world(cam_transform, screen_pos).ok()
}

/// Forward primary-button input as pointer events; right click cancels the
/// selection. Presses over the UI are swallowed, releases always go through
/// so a drag that ends on a panel still finishes.
#[allow(clippy::too_many_arguments)]
pub fn forward_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut moved: EventReader<CursorMoved>,
    capture: Res<EguiCapture>,
    mut pressed: EventWriter<PointerPressed>,
    mut motion: EventWriter<PointerMoved>,
    mut released: EventWriter<PointerReleased>,
    mut cancel: EventWriter<CancelSelection>,
) {
    let cursor = windows.get_single().ok().and_then(Window::cursor_position);

    for event in moved.read() {
        motion.send(PointerMoved {
            screen: event.position,
        });
    }

    if capture.pointer {
        if let Some(screen) = cursor.filter(|_| buttons.just_released(MouseButton::Left)) {
            released.send(PointerReleased { screen });
        }
        return;
    }

    let Some(screen) = cursor else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        pressed.send(PointerPressed { screen });
    }
    if buttons.just_released(MouseButton::Left) {
        released.send(PointerReleased { screen });
    }
    if buttons.just_pressed(MouseButton::Right) {
        cancel.send(CancelSelection);
    }
}

/// Mode, rotation, level and menu shortcuts from the configured bindings.
#[allow(clippy::too_many_arguments)]
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    capture: Res<EguiCapture>,
    mut build: EventWriter<ToggleBuildMode>,
    mut demolition: EventWriter<ToggleDemolitionMode>,
    mut rotate: EventWriter<RotateSelection>,
    mut level: EventWriter<ChangeLevel>,
    mut menu: EventWriter<ToggleMenu>,
) {
    if capture.keyboard {
        return;
    }
    if bindings.toggle_build_mode.just_pressed(&keys) {
        build.send(ToggleBuildMode);
    }
    if bindings.toggle_demolition.just_pressed(&keys) {
        demolition.send(ToggleDemolitionMode);
    }
    if bindings.rotate_selection.just_pressed(&keys) {
        rotate.send(RotateSelection);
    }
    if bindings.level_up.just_pressed(&keys) {
        level.send(ChangeLevel { direction: 1 });
    }
    if bindings.level_down.just_pressed(&keys) {
        level.send(ChangeLevel { direction: -1 });
    }
    if bindings.toggle_menu.just_pressed(&keys) {
        menu.send(ToggleMenu);
    }
}
