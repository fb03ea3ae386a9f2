//! Build menu: prototype palette plus save, load and new-game controls.
//!
//! Shown while the menu is open. Picking a prototype or a save closes the
//! menu so placement input resumes.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use placement::build_mode::BuildMode;
use placement::events::{SelectPrototype, ToggleMenu};
use placement::keybindings::KeyBindings;
use placement::prototypes::{PrototypeLibrary, SnapCategory};
use save::{LoadGameEvent, NewGameEvent, SaveGameEvent, SaveStore};

use crate::keybinds::key_help_rows;
use crate::save_slot_format::format_slot_label;
use crate::save_slots::SaveSlotList;

const MENU_WIDTH: f32 = 240.0;
const PALETTE_GROUPS: [SnapCategory; 3] =
    [SnapCategory::Ground, SnapCategory::Wall, SnapCategory::Free];

/// Library indices per snap category, in library order. Empty groups are
/// left out.
pub fn palette_groups(library: &PrototypeLibrary) -> Vec<(SnapCategory, Vec<usize>)> {
    PALETTE_GROUPS
        .iter()
        .map(|&category| {
            let indices = library
                .iter()
                .enumerate()
                .filter(|(_, p)| p.snap == category)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();
            (category, indices)
        })
        .filter(|(_, indices)| !indices.is_empty())
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn build_menu_ui(
    mut contexts: EguiContexts,
    mode: Res<BuildMode>,
    library: Res<PrototypeLibrary>,
    store: Res<SaveStore>,
    slots: Res<SaveSlotList>,
    bindings: Res<KeyBindings>,
    mut select: EventWriter<SelectPrototype>,
    mut menu: EventWriter<ToggleMenu>,
    mut save_events: EventWriter<SaveGameEvent>,
    mut load_events: EventWriter<LoadGameEvent>,
    mut new_game_events: EventWriter<NewGameEvent>,
) {
    if !mode.menu_open {
        return;
    }

    let mut close = false;
    egui::SidePanel::left("build_menu")
        .exact_width(MENU_WIDTH)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Build");
            for (category, indices) in palette_groups(&library) {
                ui.label(egui::RichText::new(category.label()).small().weak());
                for index in indices {
                    let Some(prototype) = library.get(index) else {
                        continue;
                    };
                    let selected = mode.selected() == Some(index);
                    let response = ui.selectable_label(selected, prototype.name.as_str());
                    let response = if prototype.description.is_empty() {
                        response
                    } else {
                        response.on_hover_text(prototype.description.as_str())
                    };
                    if response.clicked() {
                        select.send(SelectPrototype { index });
                        close = true;
                    }
                }
                ui.add_space(4.0);
            }

            ui.separator();
            ui.heading("Game");
            ui.horizontal(|ui| {
                let can_overwrite = store.current().is_some();
                if ui
                    .add_enabled(can_overwrite, egui::Button::new("Save"))
                    .on_disabled_hover_text("Nothing loaded or saved yet")
                    .clicked()
                {
                    save_events.send(SaveGameEvent { overwrite: true });
                }
                if ui.button("Save as new").clicked() {
                    save_events.send(SaveGameEvent { overwrite: false });
                }
            });
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!slots.slots.is_empty(), egui::Button::new("Load latest"))
                    .clicked()
                {
                    load_events.send(LoadGameEvent::default());
                    close = true;
                }
                if ui.button("New game").clicked() {
                    new_game_events.send(NewGameEvent);
                    close = true;
                }
            });

            ui.separator();
            ui.label(egui::RichText::new("Saves").small().weak());
            if let Some(err) = &slots.error {
                ui.colored_label(egui::Color32::from_rgb(230, 90, 70), err.as_str());
            }
            if slots.slots.is_empty() && slots.error.is_none() {
                ui.label(egui::RichText::new("No saves yet").italics());
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for slot in &slots.slots {
                    let is_current = store.current() == Some(slot.path.as_path());
                    if ui
                        .selectable_label(is_current, format_slot_label(slot))
                        .clicked()
                    {
                        load_events.send(LoadGameEvent {
                            file: Some(slot.name.clone()),
                        });
                        close = true;
                    }
                }
            });

            ui.separator();
            ui.collapsing("Keys", |ui| {
                for (category, rows) in key_help_rows(&bindings) {
                    ui.label(egui::RichText::new(category).small().weak());
                    egui::Grid::new(category).num_columns(2).show(ui, |ui| {
                        for (action, key) in rows {
                            ui.label(action);
                            ui.monospace(key);
                            ui.end_row();
                        }
                    });
                }
            });
        });

    if close {
        menu.send(ToggleMenu);
    }
}
