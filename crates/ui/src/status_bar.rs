use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use placement::build_mode::BuildMode;
use placement::events::{ChangeLevel, ToggleBuildMode, ToggleDemolitionMode, ToggleMenu};
use placement::grid::LevelStack;
use placement::keybindings::KeyBindings;
use placement::prototypes::PrototypeLibrary;

const ACTIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 200, 120);
const DEMOLISH_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 90, 70);
const BLOCKED_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 90, 70);

pub fn mode_label(mode: &BuildMode) -> &'static str {
    match (mode.build_active, mode.demolish_active) {
        (_, true) => "Demolish",
        (true, false) => "Build",
        (false, false) => "View",
    }
}

/// "Floor 2x2 @ 90°", or "Nothing selected".
pub fn selection_label(mode: &BuildMode, library: &PrototypeLibrary) -> String {
    match mode.selected().and_then(|index| library.get(index)) {
        Some(prototype) => format!("{} @ {}°", prototype.name, mode.rotation()),
        None => "Nothing selected".to_string(),
    }
}

/// Top bar with mode toggles, the active level and the current selection.
#[allow(clippy::too_many_arguments)]
pub fn status_bar_ui(
    mut contexts: EguiContexts,
    mode: Res<BuildMode>,
    levels: Res<LevelStack>,
    library: Res<PrototypeLibrary>,
    bindings: Res<KeyBindings>,
    mut build: EventWriter<ToggleBuildMode>,
    mut demolition: EventWriter<ToggleDemolitionMode>,
    mut level: EventWriter<ChangeLevel>,
    mut menu: EventWriter<ToggleMenu>,
) {
    egui::TopBottomPanel::top("status_bar").show(contexts.ctx_mut(), |ui| {
        ui.horizontal(|ui| {
            let menu_text = format!("Menu [{}]", bindings.toggle_menu.display_label());
            if ui.selectable_label(mode.menu_open, menu_text).clicked() {
                menu.send(ToggleMenu);
            }
            ui.separator();

            let build_text = format!("Build [{}]", bindings.toggle_build_mode.display_label());
            if ui.selectable_label(mode.build_active, build_text).clicked() {
                build.send(ToggleBuildMode);
            }
            let demolish_text = format!(
                "Demolish [{}]",
                bindings.toggle_demolition.display_label()
            );
            if ui.selectable_label(mode.demolish_active, demolish_text).clicked() {
                demolition.send(ToggleDemolitionMode);
            }
            ui.separator();

            if ui.small_button("v").clicked() {
                level.send(ChangeLevel { direction: -1 });
            }
            ui.label(format!(
                "Level {}/{}",
                levels.active_index() + 1,
                levels.len()
            ));
            if ui.small_button("^").clicked() {
                level.send(ChangeLevel { direction: 1 });
            }
            ui.separator();

            let color = if mode.demolish_active {
                DEMOLISH_COLOR
            } else if mode.build_active {
                ACTIVE_COLOR
            } else {
                ui.visuals().text_color()
            };
            ui.label(egui::RichText::new(mode_label(&mode)).strong().color(color));
            if mode.build_active {
                ui.label(selection_label(&mode, &library));
                if mode.placement_blocked {
                    ui.label(egui::RichText::new("Blocked").color(BLOCKED_COLOR));
                }
            }
        });
    });
}
