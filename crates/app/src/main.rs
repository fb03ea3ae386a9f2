use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use save::{SaveFormat, SaveKey, SaveStore};

/// Directory for save files. Defaults to `saves` next to the working directory.
const SAVE_DIR_VAR: &str = "GRID_BUILDER_SAVE_DIR";
/// `json` writes readable saves; anything else keeps the compact binary format.
const SAVE_FORMAT_VAR: &str = "GRID_BUILDER_SAVE_FORMAT";
/// 64 hex digits; when set, saves are written encrypted.
const SAVE_KEY_VAR: &str = "GRID_BUILDER_SAVE_KEY";

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Grid Builder".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(save_store_from_env())
    .add_plugins((
        placement::PlacementPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
        save::SavePlugin,
    ));

    app.run();
}

fn save_store_from_env() -> SaveStore {
    let store = std::env::var(SAVE_DIR_VAR)
        .map(SaveStore::new)
        .unwrap_or_default();
    let store = match std::env::var(SAVE_FORMAT_VAR).as_deref() {
        Ok("json") => store.with_format(SaveFormat::Json, false),
        _ => store,
    };
    let Ok(hex) = std::env::var(SAVE_KEY_VAR) else {
        return store;
    };
    match SaveKey::from_hex(&hex) {
        Ok(key) => {
            info!("Save encryption enabled");
            store.with_encryption(key)
        }
        Err(err) => {
            warn!("Ignoring {SAVE_KEY_VAR}: {err}");
            store
        }
    }
}
