//! Egui input guard: keeps clicks and key presses aimed at the build menu from
//! reaching the level underneath.
//!
//! The capture flags are sampled once per frame into `EguiCapture` so world
//! input systems read a plain resource instead of each borrowing the egui
//! context.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EguiCapture {
    /// The cursor is over an egui panel or egui is handling a drag/click.
    pub pointer: bool,
    /// A text field or other egui widget has keyboard focus.
    pub keyboard: bool,
}

pub fn track_egui_capture(mut contexts: EguiContexts, mut capture: ResMut<EguiCapture>) {
    let next = match contexts.try_ctx_mut() {
        Some(ctx) => EguiCapture {
            pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
            keyboard: ctx.wants_keyboard_input(),
        },
        None => EguiCapture::default(),
    };
    capture.set_if_neq(next);
}
