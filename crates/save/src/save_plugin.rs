use std::path::PathBuf;

use bevy::prelude::*;

use placement::build_mode::BuildMode;
use placement::grid::LevelStack;
use placement::notifications::NotificationEvent;
use placement::prototypes::PrototypeLibrary;
use placement::registry::ObjectRegistry;
use placement::site;
use placement::visuals::{CommandsSpawner, ModelCatalog};
use placement::PlacementSet;

use crate::mapper::{self, ImportReport};
use crate::save_types::SaveRecord;
use crate::store::SaveStore;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Save/load flow. Request events move out of `Idle`; the work runs once on
/// entering the target state, which then returns to `Idle`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SaveLoadState {
    #[default]
    Idle,
    Saving,
    Loading,
    NewGame,
}

// ---------------------------------------------------------------------------
// Buffer resources
// ---------------------------------------------------------------------------

#[derive(Resource, Default)]
pub(crate) struct PendingSave {
    overwrite: bool,
}

/// Record read from disk that the load system will replay.
#[derive(Resource, Default)]
pub(crate) struct PendingLoad(pub(crate) Option<SaveRecord>);

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Write the current build to disk. With `overwrite` the file last saved or
/// loaded is replaced; otherwise a new file is started.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveGameEvent {
    pub overwrite: bool,
}

/// Load a save file by name, or the most recent one when `file` is `None`.
#[derive(Event, Debug, Clone, Default)]
pub struct LoadGameEvent {
    pub file: Option<String>,
}

/// Clear every level and free object.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NewGameEvent;

#[derive(Event, Debug, Clone)]
pub struct GameSaved {
    pub path: PathBuf,
}

#[derive(Event, Debug, Clone)]
pub struct GameLoaded {
    pub report: ImportReport,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Save, load and new-game handling. Needs `PlacementPlugin` and Bevy's
/// `StatesPlugin` (part of `DefaultPlugins`).
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SaveStore>() {
            app.insert_resource(SaveStore::default());
        }

        app.init_state::<SaveLoadState>()
            .add_event::<SaveGameEvent>()
            .add_event::<LoadGameEvent>()
            .add_event::<NewGameEvent>()
            .add_event::<GameSaved>()
            .add_event::<GameLoaded>()
            .init_resource::<PendingSave>()
            .init_resource::<PendingLoad>();

        app.add_systems(
            Update,
            (detect_save_event, detect_load_event, detect_new_game_event)
                .chain()
                .after(PlacementSet::Apply)
                .run_if(in_state(SaveLoadState::Idle)),
        );

        app.add_systems(OnEnter(SaveLoadState::Saving), save_world);
        app.add_systems(OnEnter(SaveLoadState::Loading), load_world);
        app.add_systems(OnEnter(SaveLoadState::NewGame), new_game);
    }
}

// ---------------------------------------------------------------------------
// Event detection systems
// ---------------------------------------------------------------------------

fn detect_save_event(
    mut events: EventReader<SaveGameEvent>,
    mut pending: ResMut<PendingSave>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    // Only the last request of a frame is honored.
    if let Some(event) = events.read().last() {
        pending.overwrite = event.overwrite;
        next_state.set(SaveLoadState::Saving);
    }
}

/// Reads and decodes the requested file up front so a bad file never touches
/// the current build.
fn detect_load_event(
    mut events: EventReader<LoadGameEvent>,
    mut store: ResMut<SaveStore>,
    mut pending: ResMut<PendingLoad>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    let result = match &event.file {
        Some(name) => store.read(name),
        None => store.read_most_recent(),
    };
    match result {
        Ok(record) => {
            pending.0 = Some(record);
            next_state.set(SaveLoadState::Loading);
        }
        Err(err) => {
            let msg = format!("Load failed: {err}");
            error!("{msg}");
            notifications.send(NotificationEvent::error(msg));
        }
    }
}

fn detect_new_game_event(
    mut events: EventReader<NewGameEvent>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    if events.read().last().is_some() {
        next_state.set(SaveLoadState::NewGame);
    }
}

// ---------------------------------------------------------------------------
// State entry systems
// ---------------------------------------------------------------------------

fn save_world(
    levels: Res<LevelStack>,
    registry: Res<ObjectRegistry>,
    pending: Res<PendingSave>,
    mut store: ResMut<SaveStore>,
    mut saved: EventWriter<GameSaved>,
    mut notifications: EventWriter<NotificationEvent>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    let record = mapper::export(&levels, &registry);
    match store.write(&record, pending.overwrite) {
        Ok(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            notifications.send(NotificationEvent::info(format!("Saved {name}")));
            saved.send(GameSaved { path });
        }
        Err(err) => {
            let msg = format!("Save failed: {err}");
            error!("{msg}");
            notifications.send(NotificationEvent::error(msg));
        }
    }
    next_state.set(SaveLoadState::Idle);
}

/// Replaces the current build with the pending record.
#[allow(clippy::too_many_arguments)]
fn load_world(
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    library: Res<PrototypeLibrary>,
    mut levels: ResMut<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut mode: ResMut<BuildMode>,
    mut pending: ResMut<PendingLoad>,
    mut loaded: EventWriter<GameLoaded>,
    mut notifications: EventWriter<NotificationEvent>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    next_state.set(SaveLoadState::Idle);
    let Some(record) = pending.0.take() else {
        warn!("Entered Loading with no pending record");
        return;
    };

    let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
    let removed = site::reset_all(&mut levels, &mut registry, &mut visuals);
    let report = mapper::import(&record, &library, &mut levels, &mut registry, &mut visuals);
    clear_stale_cursor_state(&mut mode);

    info!(
        "Loaded save: removed {removed}, placed {}, rejected {}, {} unknown prototypes, \
         {} skipped levels, {} failed",
        report.placed,
        report.rejected,
        report.missing_prototypes.len(),
        report.skipped_levels.len(),
        report.failed.len()
    );
    if report.is_clean() {
        notifications.send(NotificationEvent::info(format!(
            "Loaded {} objects",
            report.placed
        )));
    } else {
        let skipped = report.rejected
            + report.missing_prototypes.len()
            + report.failed.len()
            + report.skipped_levels.len();
        notifications.send(NotificationEvent::warning(format!(
            "Loaded {} objects, {skipped} entries could not be restored",
            report.placed
        )));
    }
    loaded.send(GameLoaded { report });
}

fn new_game(
    mut commands: Commands,
    catalog: Res<ModelCatalog>,
    mut levels: ResMut<LevelStack>,
    mut registry: ResMut<ObjectRegistry>,
    mut mode: ResMut<BuildMode>,
    mut store: ResMut<SaveStore>,
    mut notifications: EventWriter<NotificationEvent>,
    mut next_state: ResMut<NextState<SaveLoadState>>,
) {
    let mut visuals = CommandsSpawner::new(&mut commands, &catalog);
    let removed = site::reset_all(&mut levels, &mut registry, &mut visuals);
    clear_stale_cursor_state(&mut mode);
    store.clear_current();
    info!("New game: removed {removed} objects");
    notifications.send(NotificationEvent::info("New game"));
    next_state.set(SaveLoadState::Idle);
}

/// Hover and drag refer to objects and positions from before the reset.
fn clear_stale_cursor_state(mode: &mut BuildMode) {
    mode.hovered = None;
    mode.placement_blocked = false;
    mode.drag.reset();
}
