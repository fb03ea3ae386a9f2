//! Visual spawner for exercising import without a renderer.

use std::collections::HashSet;

use bevy::prelude::*;

use placement::construction_error::ConstructionError;
use placement::prototypes::BuildablePrototype;
use placement::visuals::VisualSpawner;

/// Hands out placeholder entities and counts the ones still alive.
#[derive(Default)]
pub struct CountingSpawner {
    next: u32,
    spawned: usize,
    despawned: usize,
    missing: HashSet<String>,
}

impl CountingSpawner {
    /// Spawner that fails for the model `model`.
    pub fn with_missing(model: &str) -> Self {
        let mut spawner = Self::default();
        spawner.missing.insert(model.to_string());
        spawner
    }

    pub fn live(&self) -> usize {
        self.spawned - self.despawned
    }
}

impl VisualSpawner for CountingSpawner {
    fn spawn_visual(
        &mut self,
        prototype: &BuildablePrototype,
        _transform: Transform,
    ) -> Result<Entity, ConstructionError> {
        if self.missing.contains(&prototype.model) {
            return Err(ConstructionError::MissingModel(prototype.model.clone()));
        }
        self.next += 1;
        self.spawned += 1;
        Ok(Entity::from_raw(self.next))
    }

    fn despawn_visual(&mut self, _visual: Entity) {
        self.despawned += 1;
    }

    fn visual_bounds(&self, _prototype: &BuildablePrototype) -> Option<Vec3> {
        None
    }

    fn set_demolition_preview(&mut self, _visual: Entity, _enabled: bool) {}
}
