//! Prototype type definitions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// SnapCategory
// =============================================================================

/// How a prototype attaches to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapCategory {
    /// Occupies the ground slot of every cell under its x/z footprint.
    Ground,
    /// Occupies one wall side of every cell along its x extent.
    Wall,
    /// Not bound to the grid; tracked by transform only.
    Free,
}

impl SnapCategory {
    pub fn is_grid_bound(self) -> bool {
        !matches!(self, SnapCategory::Free)
    }

    pub fn label(self) -> &'static str {
        match self {
            SnapCategory::Ground => "Ground",
            SnapCategory::Wall => "Wall",
            SnapCategory::Free => "Free",
        }
    }
}

// =============================================================================
// BuildablePrototype
// =============================================================================

/// Immutable description of a buildable object.
///
/// `size` is only meaningful for grid-bound categories: floors use x and z
/// (leave y at 0), walls use x and y (leave z at 0).
#[derive(Debug, Clone, PartialEq)]
pub struct BuildablePrototype {
    pub name: String,
    pub description: String,
    pub size: IVec3,
    pub snap: SnapCategory,
    /// Key the visual instantiator resolves to a model.
    pub model: String,
}

impl BuildablePrototype {
    pub fn new(name: impl Into<String>, snap: SnapCategory, size: IVec3) -> Self {
        let name = name.into();
        Self {
            model: name.clone(),
            name,
            description: String::new(),
            size,
            snap,
        }
    }

    pub fn ground(name: impl Into<String>, x: i32, z: i32) -> Self {
        Self::new(name, SnapCategory::Ground, IVec3::new(x, 0, z))
    }

    pub fn wall(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self::new(name, SnapCategory::Wall, IVec3::new(x, y, 0))
    }

    pub fn free(name: impl Into<String>) -> Self {
        Self::new(name, SnapCategory::Free, IVec3::ZERO)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
