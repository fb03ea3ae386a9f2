use bevy::prelude::*;

use placement::build_mode::BuildMode;
use placement::grid::{GridLevel, LevelStack};

const GRID_LINE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);
const GRID_BORDER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.45);
/// Keeps the lines from z-fighting with floors on the level plane.
const GRID_LIFT: f32 = 0.005;

/// Line segments of a level's cell grid: `x_size + 1` lines along Z followed
/// by `z_size + 1` lines along X. The first and last of each run are the
/// border.
pub fn grid_lines(level: &GridLevel) -> Vec<(Vec3, Vec3)> {
    let x = level.x_size() as i32;
    let z = level.z_size() as i32;
    let up = Vec3::Y * GRID_LIFT;
    let mut lines = Vec::with_capacity((x + z + 2) as usize);
    for ix in 0..=x {
        lines.push((
            level.cell_corner_world(ix, 0) + up,
            level.cell_corner_world(ix, z) + up,
        ));
    }
    for iz in 0..=z {
        lines.push((
            level.cell_corner_world(0, iz) + up,
            level.cell_corner_world(x, iz) + up,
        ));
    }
    lines
}

/// Draw the active level's grid while building or demolishing.
pub fn draw_active_grid(mode: Res<BuildMode>, levels: Res<LevelStack>, mut gizmos: Gizmos) {
    if !mode.build_active && !mode.demolish_active {
        return;
    }
    let level = levels.active();
    let x_lines = level.x_size() + 1;
    let z_lines = level.z_size() + 1;
    for (i, (a, b)) in grid_lines(level).into_iter().enumerate() {
        let border = i == 0 || i == x_lines - 1 || i == x_lines || i == x_lines + z_lines - 1;
        let color = if border {
            GRID_BORDER_COLOR
        } else {
            GRID_LINE_COLOR
        };
        gizmos.line(a, b, color);
    }
}
