//! `PrototypeLibrary` resource.

use bevy::prelude::*;

use super::types::BuildablePrototype;

/// Ordered collection of the prototypes the player can build.
#[derive(Resource, Debug, Clone, Default)]
pub struct PrototypeLibrary {
    prototypes: Vec<BuildablePrototype>,
}

impl PrototypeLibrary {
    pub fn new(prototypes: impl IntoIterator<Item = BuildablePrototype>) -> Self {
        let mut library = Self::default();
        for prototype in prototypes {
            library.add(prototype);
        }
        library
    }

    /// The library shipped with the toolkit: a handful of floors, walls and
    /// free-standing props.
    pub fn starter() -> Self {
        Self::new([
            BuildablePrototype::ground("Floor 1x1", 1, 1)
                .with_description("A single floor tile."),
            BuildablePrototype::ground("Floor 2x2", 2, 2)
                .with_description("A square floor slab covering four cells."),
            BuildablePrototype::ground("Floor 3x1", 3, 1)
                .with_description("A long floor strip."),
            BuildablePrototype::wall("Wall 1", 1, 2).with_description("A one-cell wall."),
            BuildablePrototype::wall("Wall 2", 2, 2).with_description("A two-cell wall."),
            BuildablePrototype::wall("Wall 3", 3, 2).with_description("A three-cell wall."),
            BuildablePrototype::free("Crate").with_description("A wooden crate."),
            BuildablePrototype::free("Barrel").with_description("A barrel."),
        ])
    }

    /// Add a prototype, returning its index. Names must be unique; a duplicate
    /// is ignored and `None` returned.
    pub fn add(&mut self, prototype: BuildablePrototype) -> Option<usize> {
        if self.index_of(&prototype.name).is_some() {
            warn!(
                "PrototypeLibrary: duplicate name '{}' ignored",
                prototype.name
            );
            return None;
        }
        self.prototypes.push(prototype);
        Some(self.prototypes.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&BuildablePrototype> {
        self.prototypes.get(index)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&BuildablePrototype> {
        self.prototypes.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.prototypes.iter().position(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildablePrototype> {
        self.prototypes.iter()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
