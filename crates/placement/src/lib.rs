//! Grid placement engine.
//!
//! Maps cursor positions onto a stack of grid levels, validates and commits
//! multi-cell footprints, tracks which object occupies which cell and drives
//! the interactive build and demolition modes through Bevy events.

use bevy::prelude::*;

pub mod build_mode;
pub mod config;
pub mod construction_error;
pub mod events;
pub mod footprint;
pub mod grid;
pub mod keybindings;
pub mod notifications;
pub mod picking;
pub mod prototypes;
pub mod registry;
pub mod site;
pub mod visuals;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

use build_mode::systems;
use build_mode::{BuildMode, CursorRay};
use config::BuildConfig;
use events::*;
use grid::LevelStack;
use keybindings::KeyBindings;
use notifications::{NotificationEvent, NotificationLog};
use prototypes::PrototypeLibrary;
use registry::ObjectRegistry;
use visuals::ModelCatalog;

/// Ordered phases for placement systems in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Cursor` → `Apply`. Systems in other
/// crates that send requests should run before `Input`; systems that read the
/// resulting state should run after `Apply`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlacementSet {
    /// Mode, selection and level changes.
    Input,
    /// Cursor projection, snapping and pointer handling.
    Cursor,
    /// Placement, fill and demolition.
    Apply,
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        // A BuildConfig or PrototypeLibrary inserted before the plugin wins.
        let config = app
            .world()
            .get_resource::<BuildConfig>()
            .cloned()
            .unwrap_or_default();
        if !app.world().contains_resource::<LevelStack>() {
            app.insert_resource(LevelStack::new(&config));
        }
        if !app.world().contains_resource::<PrototypeLibrary>() {
            app.insert_resource(PrototypeLibrary::starter());
        }
        if !app.world().contains_resource::<ModelCatalog>() {
            let mut catalog = ModelCatalog::starter();
            if let Some(library) = app.world().get_resource::<PrototypeLibrary>() {
                for prototype in library.iter() {
                    if !catalog.contains(&prototype.model) {
                        catalog.register(prototype.model.clone(), None);
                    }
                }
            }
            app.insert_resource(catalog);
        }
        info!(
            "Placement grid: {} levels of {}x{} cells",
            config.levels, config.x_size, config.z_size
        );

        app.insert_resource(config)
            .init_resource::<ObjectRegistry>()
            .init_resource::<KeyBindings>()
            .init_resource::<BuildMode>()
            .init_resource::<CursorRay>()
            .init_resource::<NotificationLog>();

        app.add_event::<PlaceRequest>()
            .add_event::<DemolishRequest>()
            .add_event::<FillRequest>()
            .add_event::<ChangeLevel>()
            .add_event::<SelectPrototype>()
            .add_event::<ToggleBuildMode>()
            .add_event::<ToggleDemolitionMode>()
            .add_event::<RotateSelection>()
            .add_event::<CancelSelection>()
            .add_event::<ToggleMenu>()
            .add_event::<PointerPressed>()
            .add_event::<PointerMoved>()
            .add_event::<PointerReleased>()
            .add_event::<LevelChanged>()
            .add_event::<BuildModeChanged>()
            .add_event::<DemolitionModeChanged>()
            .add_event::<MenuToggled>()
            .add_event::<ObjectPlaced>()
            .add_event::<ObjectDemolished>()
            .add_event::<NotificationEvent>();

        app.configure_sets(
            Update,
            (
                PlacementSet::Input,
                PlacementSet::Cursor,
                PlacementSet::Apply,
            )
                .chain(),
        );

        app.add_systems(Startup, keybindings::warn_key_conflicts);

        app.add_systems(
            Update,
            (
                systems::handle_mode_toggles,
                systems::handle_selection_requests,
                systems::handle_level_change,
            )
                .chain()
                .in_set(PlacementSet::Input),
        )
        .add_systems(
            Update,
            (systems::update_cursor_target, systems::handle_pointer)
                .chain()
                .in_set(PlacementSet::Cursor),
        )
        .add_systems(
            Update,
            (
                systems::handle_demolish_requests,
                systems::handle_place_requests,
                systems::handle_fill_requests,
            )
                .chain()
                .in_set(PlacementSet::Apply),
        )
        .add_systems(
            Update,
            (
                notifications::collect_notifications,
                notifications::sweep_expired_notifications,
            )
                .chain()
                .after(PlacementSet::Apply),
        );
    }
}
