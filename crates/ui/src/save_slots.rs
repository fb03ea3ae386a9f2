//! Cached listing of the save directory for the build menu.

use bevy::prelude::*;

use placement::events::MenuToggled;
use save::store::SaveFileInfo;
use save::{GameSaved, SaveStore};

/// Save files as last read from disk, newest first.
#[derive(Resource, Debug, Default)]
pub struct SaveSlotList {
    pub slots: Vec<SaveFileInfo>,
    /// Set when the listing could not be read.
    pub error: Option<String>,
    /// Re-read the directory on the next refresh pass.
    pub stale: bool,
}

impl SaveSlotList {
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }
}

/// Re-list the save directory when the menu opens, after every save and
/// whenever something marked the list stale.
pub fn refresh_save_slots(
    mut toggled: EventReader<MenuToggled>,
    mut saved: EventReader<GameSaved>,
    store: Res<SaveStore>,
    mut list: ResMut<SaveSlotList>,
) {
    let opened = toggled.read().any(|t| t.open);
    let wrote = saved.read().count() > 0;
    if !(opened || wrote || list.stale) {
        return;
    }
    list.stale = false;
    match store.list_saves() {
        Ok(slots) => {
            list.slots = slots;
            list.error = None;
        }
        Err(err) => {
            warn!("Could not list saves in {}: {err}", store.dir().display());
            list.slots.clear();
            list.error = Some(err.to_string());
        }
    }
}
