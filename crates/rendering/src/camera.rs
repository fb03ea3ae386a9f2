use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use placement::events::LevelChanged;
use placement::grid::LevelStack;
use placement::keybindings::KeyBindings;

const PAN_SPEED: f32 = 12.0;
const ROTATE_SPEED: f32 = 1.5;
const ZOOM_SPEED: f32 = 0.12;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 120.0;
const MIN_PITCH: f32 = 10.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Seconds for the focus to settle on a new level height.
const LEVEL_FOLLOW_SECS: f32 = 0.15;

/// Orbital camera model: the camera circles a focus point on the active level.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    pub distance: f32,
    /// Height the focus eases towards, set from the active level.
    pub target_height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 50.0_f32.to_radians(),
            distance: 24.0,
            target_height: 0.0,
        }
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, levels: Res<LevelStack>) {
    let height = levels.active().origin().y;
    let orbit = OrbitCamera {
        focus: Vec3::new(0.0, height, 0.0),
        target_height: height,
        ..Default::default()
    };
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

/// Keep the focus over the grid of the active level.
fn clamp_focus(focus: &mut Vec3, half_extent: Vec2) {
    focus.x = focus.x.clamp(-half_extent.x, half_extent.x);
    focus.z = focus.z.clamp(-half_extent.y, half_extent.y);
}

fn grid_half_extent(levels: &LevelStack) -> Vec2 {
    let level = levels.active();
    Vec2::new(
        level.x_size() as f32 * level.cell_size() / 2.0,
        level.z_size() as f32 * level.cell_size() / 2.0,
    )
}

/// Camera position and look-at target for an orbit state.
pub fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    (orbit.focus + Vec3::new(x, y, z), orbit.focus)
}

/// Screen-relative pan direction turned into a ground-plane offset for `yaw`.
pub fn pan_on_ground(dir: Vec2, yaw: f32) -> Vec2 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec2::new(
        dir.x * cos_yaw + dir.y * sin_yaw,
        -dir.x * sin_yaw + dir.y * cos_yaw,
    )
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// Pan the focus along the ground, relative to the current yaw.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    levels: Res<LevelStack>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if bindings.camera_pan_forward.pressed(&keys) {
        dir.y -= 1.0;
    }
    if bindings.camera_pan_back.pressed(&keys) {
        dir.y += 1.0;
    }
    if bindings.camera_pan_left.pressed(&keys) {
        dir.x -= 1.0;
    }
    if bindings.camera_pan_right.pressed(&keys) {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }

    // Faster when zoomed out.
    let scale = orbit.distance / 24.0;
    let delta = pan_on_ground(dir.normalize(), orbit.yaw) * PAN_SPEED * scale * time.delta_secs();
    orbit.focus.x += delta.x;
    orbit.focus.z += delta.y;
    clamp_focus(&mut orbit.focus, grid_half_extent(&levels));
}

pub fn camera_rotate_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut turn = 0.0;
    if bindings.camera_rotate_left.pressed(&keys) {
        turn -= 1.0;
    }
    if bindings.camera_rotate_right.pressed(&keys) {
        turn += 1.0;
    }
    if turn != 0.0 {
        orbit.yaw += turn * ROTATE_SPEED * time.delta_secs();
    }
}

/// Middle-mouse drag: orbit (horizontal = yaw, vertical = pitch).
///
/// Right click is taken by selection cancel, so orbiting lives on the middle
/// button.
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Middle) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }
    if buttons.just_released(MouseButton::Middle) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            orbit.yaw += delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        orbit.distance = zoomed_distance(orbit.distance, dy);
    }
}

pub fn zoomed_distance(distance: f32, scroll: f32) -> f32 {
    (distance * (1.0 - scroll * ZOOM_SPEED)).clamp(MIN_DISTANCE, MAX_DISTANCE)
}

/// Raise or lower the focus to the level that just became active.
pub fn follow_active_level(
    mut changes: EventReader<LevelChanged>,
    time: Res<Time>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if let Some(change) = changes.read().last() {
        orbit.target_height = change.height;
    }
    let gap = orbit.target_height - orbit.focus.y;
    if gap.abs() <= f32::EPSILON {
        return;
    }
    let t = (time.delta_secs() / LEVEL_FOLLOW_SECS).min(1.0);
    orbit.focus.y += gap * t;
    if (orbit.target_height - orbit.focus.y).abs() < 0.01 {
        orbit.focus.y = orbit.target_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_looks_at_focus_from_above() {
        let orbit = OrbitCamera {
            focus: Vec3::new(2.0, 3.0, -1.0),
            ..Default::default()
        };
        let (pos, look_at) = orbit_to_transform(&orbit);
        assert_eq!(look_at, orbit.focus);
        assert!(pos.y > orbit.focus.y);
        assert!((pos.distance(orbit.focus) - orbit.distance).abs() < 1e-4);
    }

    #[test]
    fn test_pan_is_screen_relative() {
        // Unrotated: forward is -Z.
        let forward = pan_on_ground(Vec2::new(0.0, -1.0), 0.0);
        assert!((forward - Vec2::new(0.0, -1.0)).length() < 1e-5);

        // A quarter turn maps forward onto -X.
        let turned = pan_on_ground(Vec2::new(0.0, -1.0), std::f32::consts::FRAC_PI_2);
        assert!((turned - Vec2::new(-1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(zoomed_distance(MIN_DISTANCE, 5.0), MIN_DISTANCE);
        assert_eq!(zoomed_distance(MAX_DISTANCE, -20.0), MAX_DISTANCE);
        assert!(zoomed_distance(24.0, 1.0) < 24.0);
    }

    #[test]
    fn test_clamp_focus_keeps_focus_over_grid() {
        let mut focus = Vec3::new(50.0, 1.0, -50.0);
        clamp_focus(&mut focus, Vec2::new(5.0, 8.0));
        assert_eq!(focus, Vec3::new(5.0, 1.0, -8.0));
    }
}
