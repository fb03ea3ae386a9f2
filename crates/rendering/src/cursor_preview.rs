use bevy::prelude::*;

use placement::build_mode::BuildMode;
use placement::config::BuildConfig;
use placement::footprint::{collider_offset, world_size};
use placement::grid::{GridLevel, LevelStack};
use placement::prototypes::{BuildablePrototype, PrototypeLibrary};
use placement::visuals::ModelCatalog;

const VALID_COLOR: Color = Color::srgba(0.3, 0.85, 0.35, 0.45);
const BLOCKED_COLOR: Color = Color::srgba(0.9, 0.2, 0.15, 0.45);
const GROUND_CURSOR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);
const DRAG_OUTLINE_COLOR: Color = Color::srgba(0.3, 0.7, 1.0, 0.9);
const DRAG_CROSSHAIR_COLOR: Color = Color::srgba(0.3, 0.7, 1.0, 0.35);

/// Marker for the translucent ghost of the selected prototype.
#[derive(Component)]
pub struct CursorPreview;

pub fn spawn_cursor_preview(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Unit box, scaled to the selection every frame.
    let mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: VALID_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands.spawn((
        CursorPreview,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        Visibility::Hidden,
    ));
}

/// Transform of the ghost for `prototype` placed at `position` with `yaw`
/// degrees: the unit box is scaled to the body and lifted by its offset.
pub fn preview_transform(
    prototype: &BuildablePrototype,
    position: Vec3,
    yaw: f32,
    free_bounds: Option<Vec3>,
) -> Transform {
    let rotation = Quat::from_rotation_y(yaw.to_radians());
    Transform {
        translation: position + rotation * collider_offset(prototype),
        rotation,
        scale: world_size(prototype, free_bounds),
    }
}

pub fn preview_color(blocked: bool) -> Color {
    if blocked {
        BLOCKED_COLOR
    } else {
        VALID_COLOR
    }
}

pub fn update_cursor_preview(
    mode: Res<BuildMode>,
    library: Res<PrototypeLibrary>,
    catalog: Res<ModelCatalog>,
    mut query: Query<
        (
            &mut Transform,
            &mut Visibility,
            &MeshMaterial3d<StandardMaterial>,
        ),
        With<CursorPreview>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok((mut transform, mut vis, mat_handle)) = query.get_single_mut() else {
        return;
    };

    let target = mode
        .can_place()
        .then(|| mode.selected().and_then(|index| library.get(index)))
        .flatten()
        .zip(mode.snapped);
    let Some((prototype, snapped)) = target else {
        *vis = Visibility::Hidden;
        return;
    };

    *transform = preview_transform(
        prototype,
        snapped,
        mode.yaw(),
        catalog.bounds(&prototype.model),
    );
    *vis = Visibility::Visible;

    let color = preview_color(mode.placement_blocked);
    if let Some(mat) = materials.get_mut(&mat_handle.0) {
        if mat.base_color != color {
            mat.base_color = color;
        }
    }
}

/// Small cross under the raw cursor on the active level.
pub fn draw_ground_cursor(mode: Res<BuildMode>, config: Res<BuildConfig>, mut gizmos: Gizmos) {
    if !config.show_ground_cursor || !mode.accepts_input() {
        return;
    }
    let Some(cursor) = mode.cursor else {
        return;
    };
    let p = cursor + Vec3::Y * 0.01;
    let r = 0.2;
    gizmos.line(p - Vec3::X * r, p + Vec3::X * r, GROUND_CURSOR_COLOR);
    gizmos.line(p - Vec3::Z * r, p + Vec3::Z * r, GROUND_CURSOR_COLOR);
}

/// World-space outline of the cells a delayed drag covers, lifted by `lift`.
/// Corners are ordered around the rectangle.
pub fn drag_outline(level: &GridLevel, from: Vec3, to: Vec3, lift: f32) -> [Vec3; 4] {
    let a = level.world_to_grid(from);
    let b = level.world_to_grid(to);
    let min = a.min(b);
    let max = a.max(b) + IVec2::ONE;
    let up = Vec3::Y * lift;
    [
        level.cell_corner_world(min.x, min.y) + up,
        level.cell_corner_world(max.x, min.y) + up,
        level.cell_corner_world(max.x, max.y) + up,
        level.cell_corner_world(min.x, max.y) + up,
    ]
}

/// Outline of the rectangle being dragged out for a fill.
pub fn draw_drag_rectangle(
    mode: Res<BuildMode>,
    config: Res<BuildConfig>,
    levels: Res<LevelStack>,
    mut gizmos: Gizmos,
) {
    let Some((from, to)) = mode.drag.rectangle() else {
        return;
    };
    let [c0, c1, c2, c3] = drag_outline(
        levels.active(),
        from,
        to,
        config.drag_visual_ground_offset,
    );
    gizmos.line(c0, c1, DRAG_OUTLINE_COLOR);
    gizmos.line(c1, c2, DRAG_OUTLINE_COLOR);
    gizmos.line(c2, c3, DRAG_OUTLINE_COLOR);
    gizmos.line(c3, c0, DRAG_OUTLINE_COLOR);
    gizmos.line(c0, c2, DRAG_CROSSHAIR_COLOR);
    gizmos.line(c1, c3, DRAG_CROSSHAIR_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    use placement::config::WALL_THICKNESS;

    fn level() -> GridLevel {
        let config = BuildConfig {
            x_size: 10,
            z_size: 10,
            levels: 1,
            ..Default::default()
        };
        GridLevel::new(0, &config)
    }

    #[test]
    fn test_wall_preview_stands_on_floor_and_turns() {
        let wall = BuildablePrototype::wall("Wall 2", 2, 3);
        let t = preview_transform(&wall, Vec3::new(1.0, 0.0, 0.0), 90.0, None);
        assert!((t.translation.y - 1.5).abs() < 1e-5);
        assert_eq!(t.scale, Vec3::new(2.0, 3.0, WALL_THICKNESS));
        let facing = t.rotation * Vec3::X;
        assert!((facing - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_free_preview_uses_model_bounds() {
        let barrel = BuildablePrototype::free("Barrel");
        let bounds = Vec3::new(0.6, 1.0, 0.6);
        let t = preview_transform(&barrel, Vec3::ZERO, 0.0, Some(bounds));
        assert_eq!(t.scale, bounds);
    }

    #[test]
    fn test_preview_color_follows_blocked_flag() {
        assert_eq!(preview_color(false), VALID_COLOR);
        assert_eq!(preview_color(true), BLOCKED_COLOR);
    }

    #[test]
    fn test_drag_outline_covers_whole_cells_in_any_direction() {
        let level = level();
        let forward = drag_outline(&level, Vec3::new(0.2, 0.0, 0.3), Vec3::new(2.6, 0.0, 1.1), 0.2);
        let backward =
            drag_outline(&level, Vec3::new(2.6, 0.0, 1.1), Vec3::new(0.2, 0.0, 0.3), 0.2);
        assert_eq!(forward, backward);
        assert_eq!(forward[0], Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(forward[2], Vec3::new(3.0, 0.2, 2.0));
    }
}
