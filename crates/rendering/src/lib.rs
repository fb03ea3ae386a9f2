//! Camera, pointer input and visuals for the building tool.
//!
//! Turns window input into placement events and draws what the placement
//! engine decided: object bodies, the selection ghost, the active grid and
//! the drag rectangle.

use bevy::prelude::*;

use placement::grid::LevelStack;
use placement::PlacementSet;

pub mod camera;
pub mod cursor_preview;
pub mod egui_input_guard;
pub mod grid_overlay;
pub mod input;
pub mod visual_meshes;

use camera::CameraOrbitDrag;
use egui_input_guard::EguiCapture;

/// Systems that read window input and send placement events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraOrbitDrag>()
            .init_resource::<EguiCapture>()
            .configure_sets(Update, InputSet.before(PlacementSet::Input))
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    spawn_ground,
                    visual_meshes::setup_visual_assets,
                    cursor_preview::spawn_cursor_preview,
                ),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan_keyboard,
                    camera::camera_rotate_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::follow_active_level,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .after(PlacementSet::Input),
            )
            .add_systems(
                Update,
                (
                    egui_input_guard::track_egui_capture,
                    input::update_cursor_ray,
                    input::forward_pointer,
                    input::keyboard_shortcuts,
                )
                    .chain()
                    .in_set(InputSet),
            )
            .add_systems(
                Update,
                (
                    visual_meshes::attach_visual_meshes,
                    visual_meshes::update_demolition_preview,
                    cursor_preview::update_cursor_preview,
                    cursor_preview::draw_ground_cursor,
                    cursor_preview::draw_drag_rectangle,
                    grid_overlay::draw_active_grid,
                )
                    .after(PlacementSet::Apply),
            );
    }
}

fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 400.0,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));
}

/// Plain ground under the bottom level, a little larger than the grid.
fn spawn_ground(
    mut commands: Commands,
    levels: Res<LevelStack>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(bottom) = levels.get(0) else {
        return;
    };
    let width = bottom.x_size() as f32 * bottom.cell_size() + 8.0;
    let depth = bottom.z_size() as f32 * bottom.cell_size() + 8.0;
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(width, depth))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.32, 0.42, 0.28),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_translation(bottom.origin() - Vec3::Y * 0.02),
    ));
}
