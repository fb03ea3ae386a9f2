use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;

use crate::config::BuildConfig;
use crate::footprint::{footprint_cells, is_quarter_turn};
use crate::prototypes::{BuildablePrototype, SnapCategory};
use crate::registry::{CellRef, ObjectId};

use super::cell::{GridCell, Side};

// =============================================================================
// Footprint / Rejection
// =============================================================================

/// Wall slot claimed by a wall placed at this yaw. Only `MinusZ` and `MinusX`
/// are ever used, so two walls facing each other across a shared edge from
/// neighbouring cells are not detected as overlapping.
pub fn wall_side_for(y_rotation_degrees: f32) -> Side {
    if is_quarter_turn(y_rotation_degrees) {
        Side::MinusX
    } else {
        Side::MinusZ
    }
}

/// A validated rectangle of cells on one level, ready to be linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub start: IVec2,
    pub x_len: i32,
    pub z_len: i32,
    pub category: SnapCategory,
    /// Wall slot to claim; `None` for ground pieces.
    pub side: Option<Side>,
}

impl Footprint {
    /// Cell coordinates covered, x-major.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        let start = self.start;
        (0..self.x_len)
            .flat_map(move |dx| (0..self.z_len).map(move |dz| start + IVec2::new(dx, dz)))
    }

    pub fn cell_count(&self) -> usize {
        (self.x_len * self.z_len) as usize
    }
}

/// Why a placement was turned down. Rejections are routine (dragging across
/// existing pieces produces them constantly) and never mutate anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    GroundOccupied(IVec2),
    WallOccupied(IVec2, Side),
    OutOfBounds(IVec2),
    UnknownLevel(usize),
    /// Free prototypes have no footprint on the grid.
    NotGridBound,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::GroundOccupied(c) => write!(f, "ground at ({}, {}) is occupied", c.x, c.y),
            Rejection::WallOccupied(c, side) => {
                write!(f, "wall {:?} at ({}, {}) is occupied", side, c.x, c.y)
            }
            Rejection::OutOfBounds(c) => write!(f, "cell ({}, {}) is outside the grid", c.x, c.y),
            Rejection::UnknownLevel(i) => write!(f, "level {i} does not exist"),
            Rejection::NotGridBound => write!(f, "prototype is not grid-bound"),
        }
    }
}

// =============================================================================
// GridLevel
// =============================================================================

/// One story of the building grid.
#[derive(Debug, Clone)]
pub struct GridLevel {
    index: usize,
    x_size: usize,
    z_size: usize,
    cell_size: f32,
    cell_height: f32,
    origin: Vec3,
    active: bool,
    floor_layer: u32,
    wall_layer: u32,
    free_layer: u32,
    cells: Vec<GridCell>,
}

impl GridLevel {
    pub fn new(index: usize, config: &BuildConfig) -> Self {
        Self {
            index,
            x_size: config.x_size,
            z_size: config.z_size,
            cell_size: config.cell_size,
            cell_height: config.cell_height,
            origin: Vec3::new(0.0, index as f32 * config.cell_height, 0.0),
            active: false,
            floor_layer: config.floor_layer,
            wall_layer: config.wall_layer,
            free_layer: config.free_layer,
            cells: vec![GridCell::default(); config.x_size * config.z_size],
        }
    }

    /// Shift the level horizontally. The vertical position stays
    /// `index * cell_height`.
    pub fn with_horizontal_origin(mut self, x: f32, z: f32) -> Self {
        self.origin.x = x;
        self.origin.z = z;
        self
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    #[inline]
    pub fn z_size(&self) -> usize {
        self.z_size
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle whether the level takes input. Occupancy is untouched.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Collision layer for objects of `category` placed on this level.
    pub fn layer_for(&self, category: SnapCategory) -> u32 {
        match category {
            SnapCategory::Ground => self.floor_layer,
            SnapCategory::Wall => self.wall_layer,
            SnapCategory::Free => self.free_layer,
        }
    }

    // -------------------------------------------------------------------------
    // Coordinate mapping
    // -------------------------------------------------------------------------

    /// Cell containing a world point. Grid index `(x_size/2, z_size/2)` sits at
    /// the level origin. The result may lie outside the grid.
    pub fn world_to_grid(&self, world: Vec3) -> IVec2 {
        let x = ((world.x - self.origin.x) / self.cell_size).floor() as i32 + (self.x_size / 2) as i32;
        let z = ((world.z - self.origin.z) / self.cell_size).floor() as i32 + (self.z_size / 2) as i32;
        IVec2::new(x, z)
    }

    /// Minimum corner of a cell, at level height.
    pub fn cell_corner_world(&self, ix: i32, iz: i32) -> Vec3 {
        let x = (ix - (self.x_size / 2) as i32) as f32 * self.cell_size;
        let z = (iz - (self.z_size / 2) as i32) as f32 * self.cell_size;
        self.origin + Vec3::new(x, 0.0, z)
    }

    /// Centre of a cell, at level height.
    pub fn cell_center_world(&self, ix: i32, iz: i32) -> Vec3 {
        let half = self.cell_size / 2.0;
        self.cell_corner_world(ix, iz) + Vec3::new(half, 0.0, half)
    }

    /// Snap a raw cursor hit to where a piece should be previewed and placed.
    ///
    /// Local X/Z are rounded to the nearest grid line. Axes with an odd
    /// footprint are then moved half a cell toward the raw cursor so the piece
    /// centres on the cell the cursor is over. On a quarter turn the odd-axis
    /// flags swap along with the footprint.
    pub fn snap_cursor(
        &self,
        world_cursor: Vec3,
        has_x_offset: bool,
        has_z_offset: bool,
        y_rotation_degrees: f32,
    ) -> Vec3 {
        let local = world_cursor - self.origin;
        let cs = self.cell_size;
        let x = (local.x / cs).round() * cs;
        let z = (local.z / cs).round() * cs;

        let (offset_x, offset_z) = if is_quarter_turn(y_rotation_degrees) {
            (has_z_offset, has_x_offset)
        } else {
            (has_x_offset, has_z_offset)
        };

        let nudge = |snapped: f32, raw: f32| if snapped < raw { cs / 2.0 } else { -cs / 2.0 };
        let x_off = if offset_x { nudge(x, local.x) } else { 0.0 };
        let z_off = if offset_z { nudge(z, local.z) } else { 0.0 };

        Vec3::new(x + x_off, 0.0, z + z_off) + self.origin
    }

    /// World point that `check_footprint` maps back to a footprint starting at
    /// `start`: the centre of the anchor cell on odd axes, its min corner on
    /// even ones. This is what `snap_cursor` produces for the same footprint.
    pub fn placement_point(&self, start: IVec2, x_len: i32, z_len: i32) -> Vec3 {
        let anchor = start + IVec2::new(x_len / 2, z_len / 2);
        let half = self.cell_size / 2.0;
        let corner = self.cell_corner_world(anchor.x, anchor.y);
        corner
            + Vec3::new(
                if x_len % 2 != 0 { half } else { 0.0 },
                0.0,
                if z_len % 2 != 0 { half } else { 0.0 },
            )
    }

    // -------------------------------------------------------------------------
    // Cell access
    // -------------------------------------------------------------------------

    /// `0 <= ix < x_size` and `0 <= iz < z_size`.
    #[inline]
    pub fn is_valid_index(&self, ix: i32, iz: i32) -> bool {
        ix >= 0 && iz >= 0 && (ix as usize) < self.x_size && (iz as usize) < self.z_size
    }

    /// Flat index `ix * z_size + iz`, or `None` off the grid.
    #[inline]
    pub fn flat_index(&self, ix: i32, iz: i32) -> Option<usize> {
        if self.is_valid_index(ix, iz) {
            Some(ix as usize * self.z_size + iz as usize)
        } else {
            None
        }
    }

    pub fn coords_of(&self, flat: usize) -> IVec2 {
        IVec2::new((flat / self.z_size) as i32, (flat % self.z_size) as i32)
    }

    pub fn cell(&self, ix: i32, iz: i32) -> Option<&GridCell> {
        self.flat_index(ix, iz).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, ix: i32, iz: i32) -> Option<&mut GridCell> {
        let flat = self.flat_index(ix, iz)?;
        self.cells.get_mut(flat)
    }

    pub fn cell_at(&self, flat: usize) -> Option<&GridCell> {
        self.cells.get(flat)
    }

    pub fn cell_at_mut(&mut self, flat: usize) -> Option<&mut GridCell> {
        self.cells.get_mut(flat)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(GridCell::is_empty)
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Every distinct occupant in cell order, ground before walls within a
    /// cell. A multi-cell object appears once, at the first cell it covers.
    pub fn occupants(&self) -> Vec<ObjectId> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for cell in &self.cells {
            for id in cell.occupants() {
                if seen.insert(id) {
                    out.push(id);
                }
            }
        }
        out
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    /// Validate a placement without changing anything. `world` must already be
    /// snapped; it is not re-snapped here.
    pub fn check_footprint(
        &self,
        prototype: &BuildablePrototype,
        y_rotation_degrees: f32,
        world: Vec3,
    ) -> Result<Footprint, Rejection> {
        let side = match prototype.snap {
            SnapCategory::Ground => None,
            SnapCategory::Wall => Some(wall_side_for(y_rotation_degrees)),
            SnapCategory::Free => return Err(Rejection::NotGridBound),
        };

        let (x_len, z_len) = footprint_cells(prototype, y_rotation_degrees);
        let start = self.world_to_grid(world) - IVec2::new(x_len / 2, z_len / 2);
        let footprint = Footprint {
            start,
            x_len,
            z_len,
            category: prototype.snap,
            side,
        };

        for c in footprint.cells() {
            let Some(cell) = self.cell(c.x, c.y) else {
                return Err(Rejection::OutOfBounds(c));
            };
            match side {
                None if cell.has_ground() => return Err(Rejection::GroundOccupied(c)),
                Some(side) if cell.has_wall(side) => return Err(Rejection::WallOccupied(c, side)),
                _ => {}
            }
        }
        Ok(footprint)
    }

    /// Write `id` into every cell of a footprint returned by
    /// `check_footprint`. Returns the cell refs in footprint order.
    pub fn link(&mut self, id: ObjectId, footprint: &Footprint) -> Vec<CellRef> {
        let mut refs = Vec::with_capacity(footprint.cell_count());
        for c in footprint.cells() {
            let Some(flat) = self.flat_index(c.x, c.y) else {
                continue;
            };
            let cell = &mut self.cells[flat];
            match footprint.side {
                None => cell.set_ground(id, footprint.category),
                Some(side) => cell.set_wall(id, footprint.category, side),
            }
            refs.push(CellRef {
                level: self.index,
                index: flat,
            });
        }
        refs
    }

    /// Remove `id` from the cell at `flat`, whichever slot it is in.
    pub fn unlink(&mut self, id: ObjectId, flat: usize) {
        if let Some(cell) = self.cells.get_mut(flat) {
            cell.unlink(id);
        }
    }
}
