use bevy_egui::{egui, EguiContexts};

/// Slate panels with a single teal accent for selection and active widgets.
pub fn apply_build_theme(mut contexts: EguiContexts) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(30, 34, 40);
    let idle = egui::Color32::from_rgb(46, 52, 60);
    let hover = egui::Color32::from_rgb(62, 74, 86);
    let accent = egui::Color32::from_rgb(60, 170, 160);

    let widgets = &mut style.visuals.widgets;
    widgets.noninteractive.bg_fill = panel;
    for (state, fill) in [
        (&mut widgets.inactive, idle),
        (&mut widgets.hovered, hover),
        (&mut widgets.active, accent),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.corner_radius = egui::CornerRadius::same(4);
    }

    style.visuals.panel_fill = panel;
    style.visuals.window_fill = panel;
    style.visuals.selection.bg_fill = accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, accent);
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);

    ctx.set_style(style);
}
