//! Egui front end for the building tool: status bar, build menu, save list,
//! notification ticker and the quick save/load shortcuts.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use placement::PlacementSet;
use rendering::InputSet;

pub mod build_menu;
pub mod keybinds;
pub mod notification_ticker;
pub mod save_slot_format;
pub mod save_slots;
pub mod status_bar;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        app.init_resource::<save_slots::SaveSlotList>()
            .add_systems(Startup, theme::apply_build_theme)
            .add_systems(Update, keybinds::quick_save_load_keybinds.in_set(InputSet))
            .add_systems(
                Update,
                save_slots::refresh_save_slots.after(PlacementSet::Apply),
            )
            .add_systems(
                Update,
                (
                    status_bar::status_bar_ui,
                    notification_ticker::notification_ticker_ui,
                    build_menu::build_menu_ui,
                )
                    .chain()
                    .after(save_slots::refresh_save_slots),
            );
    }
}
