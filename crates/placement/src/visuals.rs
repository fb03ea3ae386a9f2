//! Visual instantiation seam.
//!
//! The placement engine never touches meshes. It asks a `VisualSpawner` for an
//! opaque `Entity` when an object is created and hands it back on demolition.
//! In the running app `CommandsSpawner` spawns a `BuildableVisual` marker
//! entity and the rendering crate attaches meshes to it; tests substitute a
//! recording spawner.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::construction_error::ConstructionError;
use crate::footprint::{collider_offset, world_size};
use crate::prototypes::{BuildablePrototype, PrototypeLibrary, SnapCategory};

/// Creates and releases the visual representation of placed objects.
pub trait VisualSpawner {
    /// Instantiate the visual for `prototype` at `transform`. Fails when the
    /// prototype's model is unavailable.
    fn spawn_visual(
        &mut self,
        prototype: &BuildablePrototype,
        transform: Transform,
    ) -> Result<Entity, ConstructionError>;

    fn despawn_visual(&mut self, visual: Entity);

    /// Bounding box of the model, used to size free objects.
    fn visual_bounds(&self, prototype: &BuildablePrototype) -> Option<Vec3>;

    fn set_demolition_preview(&mut self, visual: Entity, enabled: bool);
}

// =============================================================================
// Model catalog
// =============================================================================

/// Known model keys and, where known, their bounding boxes.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModelCatalog {
    models: HashMap<String, Option<Vec3>>,
}

impl ModelCatalog {
    /// Register every model referenced by `library`, bounds unknown.
    pub fn for_library(library: &PrototypeLibrary) -> Self {
        let mut catalog = Self::default();
        for prototype in library.iter() {
            catalog.register(prototype.model.clone(), None);
        }
        catalog
    }

    /// Catalog matching `PrototypeLibrary::starter()`.
    pub fn starter() -> Self {
        let mut catalog = Self::for_library(&PrototypeLibrary::starter());
        catalog.register("Crate", Some(Vec3::splat(0.8)));
        catalog.register("Barrel", Some(Vec3::new(0.6, 1.0, 0.6)));
        catalog
    }

    pub fn register(&mut self, key: impl Into<String>, bounds: Option<Vec3>) {
        self.models.insert(key.into(), bounds);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    pub fn bounds(&self, key: &str) -> Option<Vec3> {
        self.models.get(key).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// =============================================================================
// Components
// =============================================================================

/// Marker for the visual of a placed object. The rendering side builds a
/// mesh for it from `size`.
#[derive(Component, Debug, Clone)]
pub struct BuildableVisual {
    pub prototype: String,
    pub model: String,
    pub snap: SnapCategory,
    /// World-space body size.
    pub size: Vec3,
    /// Offset of the body's centre from the entity origin.
    pub offset: Vec3,
}

/// Whether the visual should show as "about to be demolished".
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemolitionPreview(pub bool);

// =============================================================================
// CommandsSpawner
// =============================================================================

/// `VisualSpawner` backed by Bevy `Commands`.
pub struct CommandsSpawner<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub catalog: &'a ModelCatalog,
}

impl<'a, 'w, 's> CommandsSpawner<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, catalog: &'a ModelCatalog) -> Self {
        Self { commands, catalog }
    }
}

impl VisualSpawner for CommandsSpawner<'_, '_, '_> {
    fn spawn_visual(
        &mut self,
        prototype: &BuildablePrototype,
        transform: Transform,
    ) -> Result<Entity, ConstructionError> {
        if !self.catalog.contains(&prototype.model) {
            return Err(ConstructionError::MissingModel(prototype.model.clone()));
        }
        let size = world_size(prototype, self.catalog.bounds(&prototype.model));
        let entity = self
            .commands
            .spawn((
                BuildableVisual {
                    prototype: prototype.name.clone(),
                    model: prototype.model.clone(),
                    snap: prototype.snap,
                    size,
                    offset: collider_offset(prototype),
                },
                DemolitionPreview::default(),
                transform,
                Visibility::default(),
            ))
            .id();
        Ok(entity)
    }

    fn despawn_visual(&mut self, visual: Entity) {
        if let Some(entity) = self.commands.get_entity(visual) {
            entity.despawn_recursive();
        }
    }

    fn visual_bounds(&self, prototype: &BuildablePrototype) -> Option<Vec3> {
        self.catalog.bounds(&prototype.model)
    }

    fn set_demolition_preview(&mut self, visual: Entity, enabled: bool) {
        if let Some(mut entity) = self.commands.get_entity(visual) {
            entity.insert(DemolitionPreview(enabled));
        }
    }
}

// =============================================================================
// Recording spawner for tests
// =============================================================================

#[cfg(test)]
pub(crate) mod recording {
    use std::collections::HashSet;

    use super::*;

    /// Hands out placeholder entities and remembers what happened to them.
    #[derive(Default)]
    pub struct RecordingSpawner {
        next: u32,
        pub spawned: Vec<Entity>,
        pub despawned: Vec<Entity>,
        pub previews: Vec<(Entity, bool)>,
        pub missing: HashSet<String>,
        pub bounds: HashMap<String, Vec3>,
    }

    impl RecordingSpawner {
        pub fn with_missing(model: &str) -> Self {
            let mut spawner = Self::default();
            spawner.missing.insert(model.to_string());
            spawner
        }

        pub fn live(&self) -> usize {
            self.spawned.len() - self.despawned.len()
        }
    }

    impl VisualSpawner for RecordingSpawner {
        fn spawn_visual(
            &mut self,
            prototype: &BuildablePrototype,
            _transform: Transform,
        ) -> Result<Entity, ConstructionError> {
            if self.missing.contains(&prototype.model) {
                return Err(ConstructionError::MissingModel(prototype.model.clone()));
            }
            self.next += 1;
            let entity = Entity::from_raw(self.next);
            self.spawned.push(entity);
            Ok(entity)
        }

        fn despawn_visual(&mut self, visual: Entity) {
            self.despawned.push(visual);
        }

        fn visual_bounds(&self, prototype: &BuildablePrototype) -> Option<Vec3> {
            self.bounds.get(&prototype.model).copied()
        }

        fn set_demolition_preview(&mut self, visual: Entity, enabled: bool) {
            self.previews.push((visual, enabled));
        }
    }
}
