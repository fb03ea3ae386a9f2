//! # TestSite: headless integration test harness
//!
//! Wraps `bevy::app::App` + `PlacementPlugin` so tests can drive the build
//! tool through its events without a window or renderer.

use bevy::app::App;
use bevy::prelude::*;

use crate::build_mode::{BuildMode, CursorRay};
use crate::config::{BuildConfig, DragBehavior};
use crate::events::*;
use crate::grid::{GridLevel, LevelStack};
use crate::prototypes::PrototypeLibrary;
use crate::registry::{ObjectId, ObjectRegistry};
use crate::{PlacementPlugin, PlacementSet};

/// Every event of type `E` seen since the site was created.
#[derive(Resource)]
struct Recorded<E: Event>(Vec<E>);

impl<E: Event> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut events: EventReader<E>, mut log: ResMut<Recorded<E>>) {
    log.0.extend(events.read().cloned());
}

/// A headless Bevy App wrapping `PlacementPlugin` for integration testing.
pub struct TestSite {
    app: App,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Small site: 3 levels of 20x20 cells, default drag behavior.
    pub fn new() -> Self {
        Self::with_config(BuildConfig {
            x_size: 20,
            z_size: 20,
            levels: 3,
            ..Default::default()
        })
    }

    pub fn with_config(config: BuildConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(PlacementPlugin);
        app.init_resource::<Recorded<ObjectPlaced>>()
            .init_resource::<Recorded<ObjectDemolished>>()
            .init_resource::<Recorded<LevelChanged>>()
            .init_resource::<Recorded<BuildModeChanged>>()
            .init_resource::<Recorded<DemolitionModeChanged>>()
            .init_resource::<Recorded<MenuToggled>>()
            .add_systems(
                Update,
                (
                    record::<ObjectPlaced>,
                    record::<ObjectDemolished>,
                    record::<LevelChanged>,
                    record::<BuildModeChanged>,
                    record::<DemolitionModeChanged>,
                    record::<MenuToggled>,
                )
                    .after(PlacementSet::Apply),
            );
        app.update();
        Self { app }
    }

    /// Site with `drag_behavior` set, otherwise as `new()`.
    pub fn with_drag(behavior: DragBehavior) -> Self {
        Self::with_config(BuildConfig {
            x_size: 20,
            z_size: 20,
            levels: 3,
            drag_behavior: behavior,
            ..Default::default()
        })
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn send<E: Event>(&mut self, event: E) -> &mut Self {
        self.app.world_mut().send_event(event);
        self
    }

    /// Point the cursor straight down at world `(x, z)`.
    pub fn aim(&mut self, x: f32, z: f32) -> &mut Self {
        self.app
            .world_mut()
            .insert_resource(CursorRay::vertical(x, z, 100.0));
        self
    }

    pub fn clear_aim(&mut self) -> &mut Self {
        self.app.world_mut().insert_resource(CursorRay(None));
        self
    }

    /// Select the library entry named `name`, aim at `(x, z)` and place it.
    pub fn place(&mut self, name: &str, x: f32, z: f32) -> &mut Self {
        self.select(name);
        self.aim(x, z);
        self.send(PlaceRequest);
        self.tick(1);
        self
    }

    pub fn select(&mut self, name: &str) -> &mut Self {
        let index = self
            .resource::<PrototypeLibrary>()
            .index_of(name)
            .unwrap_or_else(|| panic!("no prototype named {name}"));
        self.send(SelectPrototype { index });
        self.tick(1);
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn mode(&self) -> &BuildMode {
        self.resource::<BuildMode>()
    }

    pub fn levels(&self) -> &LevelStack {
        self.resource::<LevelStack>()
    }

    pub fn active_level(&self) -> &GridLevel {
        self.levels().active()
    }

    pub fn registry(&self) -> &ObjectRegistry {
        self.resource::<ObjectRegistry>()
    }

    pub fn object_count(&self) -> usize {
        self.registry().len()
    }

    /// Id of the most recently placed object, if any.
    pub fn last_placed(&self) -> Option<ObjectId> {
        self.events::<ObjectPlaced>().last().map(|e| e.id)
    }

    /// Every recorded notification of type `E`, oldest first. Recorded types
    /// are the placement notifications (`ObjectPlaced`, `LevelChanged`, ...).
    pub fn events<E: Event + Clone>(&self) -> &[E] {
        &self.resource::<Recorded<E>>().0
    }
}
