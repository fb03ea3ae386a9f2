//! Multi-level occupancy grid.
//!
//! Each `GridLevel` is a flat `x_size * z_size` array of `GridCell`s sitting at
//! `level_index * cell_height` above the world origin. Cells never own placed
//! objects; they hold `ObjectId` handles into the `ObjectRegistry`, and each
//! placed object remembers the `CellRef`s it was linked into. The
//! `LevelStack` resource holds all levels with exactly one active.

pub mod cell;
pub mod level;
pub mod stack;

#[cfg(test)]
mod tests;

pub use cell::*;
pub use level::*;
pub use stack::*;
