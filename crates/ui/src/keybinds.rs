use bevy::prelude::*;

use placement::keybindings::{BindableAction, KeyBindings};
use rendering::egui_input_guard::EguiCapture;
use save::{LoadGameEvent, NewGameEvent, SaveGameEvent};

/// Quick save (F5) overwrites the current file, quick load (F9) reads the most
/// recent save, Ctrl+N starts over. Skipped while egui has keyboard focus.
pub fn quick_save_load_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    capture: Res<EguiCapture>,
    mut save_events: EventWriter<SaveGameEvent>,
    mut load_events: EventWriter<LoadGameEvent>,
    mut new_game_events: EventWriter<NewGameEvent>,
) {
    if capture.keyboard {
        return;
    }

    if bindings.quick_save.just_pressed(&keyboard) {
        save_events.send(SaveGameEvent { overwrite: true });
    }
    if bindings.quick_load.just_pressed(&keyboard) {
        load_events.send(LoadGameEvent::default());
    }
    if bindings.new_game.just_pressed(&keyboard) {
        new_game_events.send(NewGameEvent);
    }
}

/// Help rows grouped by category in binding order: (category, [(action, key)]).
pub fn key_help_rows(bindings: &KeyBindings) -> Vec<(&'static str, Vec<(&'static str, String)>)> {
    let mut groups: Vec<(&'static str, Vec<(&'static str, String)>)> = Vec::new();
    for &action in BindableAction::ALL {
        let row = (action.label(), bindings.get(action).display_label());
        let same_category = groups.last().is_some_and(|(c, _)| *c == action.category());
        match groups.last_mut() {
            Some((_, rows)) if same_category => rows.push(row),
            _ => groups.push((action.category(), vec![row])),
        }
    }
    groups
}
