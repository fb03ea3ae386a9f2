//! Buildable prototypes and the library they are selected from.
//!
//! A `BuildablePrototype` is the immutable description of something the player
//! can build: its name, footprint size, snap category and the key of the model
//! the visual instantiator draws it with. Prototypes are grouped into a
//! `PrototypeLibrary` resource; save files refer to prototypes by name, so
//! names must be unique within a library.

pub mod library;
pub mod types;


pub use library::*;
pub use types::*;
