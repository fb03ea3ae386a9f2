use bevy::prelude::*;

pub const DEFAULT_GRID_X_SIZE: usize = 200;
pub const DEFAULT_GRID_Z_SIZE: usize = 200;
pub const DEFAULT_GRID_LEVELS: usize = 10;
pub const DEFAULT_CELL_SIZE: f32 = 1.0;
pub const DEFAULT_CELL_HEIGHT: f32 = 2.0;

/// Collision layer bits. The ground layer is what the cursor ray hits while
/// building; the other three hold colliders of placed objects.
pub const GROUND_LAYER: u32 = 1 << 1;
pub const FLOOR_LAYER: u32 = 1 << 2;
pub const WALL_LAYER: u32 = 1 << 3;
pub const FREE_LAYER: u32 = 1 << 4;

/// Everything a demolition ray may hit.
pub const DEMOLISH_LAYERS: u32 = FLOOR_LAYER | WALL_LAYER | FREE_LAYER;

/// Screen-space distance (pixels) a pressed cursor must travel before a click
/// turns into a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 10.0;

/// Height of the drag rectangle visual above the level floor.
pub const DEFAULT_DRAG_VISUAL_GROUND_OFFSET: f32 = 0.2;

/// Thickness of ground pieces and walls in world units.
pub const FLOOR_THICKNESS: f32 = 0.2;
pub const WALL_THICKNESS: f32 = 0.2;

/// Yaw values within this many degrees of a quarter turn count as one.
pub const ROTATION_EPSILON: f32 = 1e-3;

/// How the pointer turns into placements while the button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragBehavior {
    /// One placement per click.
    None,
    /// Place on every cursor motion beyond the drag threshold.
    #[default]
    InstantPlacement,
    /// Draw a rectangle while dragging and fill it on release.
    DelayedPlacement,
}

/// Tunables for the grid and placement. Insert a custom value before adding
/// `PlacementPlugin` to override the defaults.
#[derive(Resource, Debug, Clone)]
pub struct BuildConfig {
    pub x_size: usize,
    pub z_size: usize,
    pub levels: usize,
    pub cell_size: f32,
    pub cell_height: f32,
    pub ground_layer: u32,
    pub floor_layer: u32,
    pub wall_layer: u32,
    pub free_layer: u32,
    pub drag_behavior: DragBehavior,
    pub drag_threshold: f32,
    pub drag_visual_ground_offset: f32,
    /// Draw a marker at the raw cursor hit point (debugging aid).
    pub show_ground_cursor: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            x_size: DEFAULT_GRID_X_SIZE,
            z_size: DEFAULT_GRID_Z_SIZE,
            levels: DEFAULT_GRID_LEVELS,
            cell_size: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_HEIGHT,
            ground_layer: GROUND_LAYER,
            floor_layer: FLOOR_LAYER,
            wall_layer: WALL_LAYER,
            free_layer: FREE_LAYER,
            drag_behavior: DragBehavior::default(),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            drag_visual_ground_offset: DEFAULT_DRAG_VISUAL_GROUND_OFFSET,
            show_ground_cursor: false,
        }
    }
}

impl BuildConfig {
    /// Union of the layers a demolition ray tests against.
    pub fn demolish_layers(&self) -> u32 {
        self.floor_layer | self.wall_layer | self.free_layer
    }
}
