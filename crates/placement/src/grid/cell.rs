use serde::{Deserialize, Serialize};

use crate::prototypes::SnapCategory;
use crate::registry::ObjectId;

/// Wall slot of a cell. Placement only ever fills `MinusZ` and `MinusX`; the
/// other two exist so the slot array covers every edge of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    MinusZ,
    MinusX,
    Z,
    X,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::MinusZ, Side::MinusX, Side::Z, Side::X];

    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Side::MinusZ => 0,
            Side::MinusX => 1,
            Side::Z => 2,
            Side::X => 3,
        }
    }
}

/// One cell of a level: an optional ground occupant and four optional wall
/// occupants. A slot holds at most one object; one object may fill the same
/// slot in many cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    ground: Option<ObjectId>,
    walls: [Option<ObjectId>; 4],
}

impl GridCell {
    /// Claim the ground slot. Ignored unless `category` is `Ground`.
    pub fn set_ground(&mut self, id: ObjectId, category: SnapCategory) {
        if category == SnapCategory::Ground {
            self.ground = Some(id);
        }
    }

    pub fn clear_ground(&mut self) {
        self.ground = None;
    }

    /// Claim one wall slot. Ignored unless `category` is `Wall`.
    pub fn set_wall(&mut self, id: ObjectId, category: SnapCategory, side: Side) {
        if category == SnapCategory::Wall {
            self.walls[side.slot()] = Some(id);
        }
    }

    pub fn clear_wall(&mut self, side: Side) {
        self.walls[side.slot()] = None;
    }

    /// Remove `id` from every wall slot that references it.
    pub fn clear_wall_object(&mut self, id: ObjectId) {
        for slot in self.walls.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    /// Remove `id` from whichever slot holds it.
    pub fn unlink(&mut self, id: ObjectId) {
        if self.ground == Some(id) {
            self.ground = None;
        } else {
            self.clear_wall_object(id);
        }
    }

    #[inline]
    pub fn has_ground(&self) -> bool {
        self.ground.is_some()
    }

    #[inline]
    pub fn has_wall(&self, side: Side) -> bool {
        self.walls[side.slot()].is_some()
    }

    #[inline]
    pub fn ground(&self) -> Option<ObjectId> {
        self.ground
    }

    #[inline]
    pub fn wall(&self, side: Side) -> Option<ObjectId> {
        self.walls[side.slot()]
    }

    /// Wall occupants in `Side::ALL` order.
    pub fn walls(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.walls.iter().flatten().copied()
    }

    /// Ground occupant first, then walls.
    pub fn occupants(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ground.into_iter().chain(self.walls())
    }

    pub fn is_empty(&self) -> bool {
        self.ground.is_none() && self.walls.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
