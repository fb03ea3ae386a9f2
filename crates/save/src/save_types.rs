// ---------------------------------------------------------------------------
// Save record structs: levels with their grid objects, plus free objects
// ---------------------------------------------------------------------------

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Current save record schema version. Records written by a newer build are
/// rejected on load.
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// Horizontal position of a grid object relative to its level's origin.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq, Default)]
pub struct SaveGridPosition {
    pub x: f32,
    pub z: f32,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, PartialEq, Default)]
pub struct SavePosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// An object bound to a level's cells.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveGridObject {
    /// Prototype name, resolved through the library on load.
    pub name: String,
    pub position: SaveGridPosition,
    /// Yaw in degrees.
    pub y_rotation: f32,
}

/// Every distinct occupant of one level. Only written for non-empty levels.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Default)]
pub struct SaveLevel {
    pub index: u32,
    pub objects: Vec<SaveGridObject>,
}

#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveFreeObject {
    pub name: String,
    pub position: SavePosition,
    /// Yaw in degrees.
    pub y_rotation: f32,
}

/// Complete persisted build state.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq)]
pub struct SaveRecord {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub levels: Vec<SaveLevel>,
    #[serde(default)]
    pub free_objects: Vec<SaveFreeObject>,
}

impl Default for SaveRecord {
    fn default() -> Self {
        Self {
            version: CURRENT_SAVE_VERSION,
            levels: Vec::new(),
            free_objects: Vec::new(),
        }
    }
}

impl SaveRecord {
    /// Number of grid and free objects in the record.
    pub fn object_count(&self) -> usize {
        self.levels.iter().map(|l| l.objects.len()).sum::<usize>() + self.free_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }

    pub fn level(&self, index: u32) -> Option<&SaveLevel> {
        self.levels.iter().find(|l| l.index == index)
    }
}
