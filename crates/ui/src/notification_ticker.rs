//! Notification ticker.
//!
//! A strip under the status bar listing active notifications color-coded by
//! priority. Errors stay until closed; warnings and info expire on their own.
//! Clicking an entry with a location moves the camera there.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use placement::notifications::{Notification, NotificationLog, NotificationPriority};
use rendering::camera::OrbitCamera;

/// Y offset from top (below the status bar).
const TICKER_Y_OFFSET: f32 = 30.0;

pub fn priority_color(priority: NotificationPriority) -> egui::Color32 {
    match priority {
        NotificationPriority::Error => egui::Color32::from_rgb(255, 70, 60),
        NotificationPriority::Warning => egui::Color32::from_rgb(255, 170, 40),
        NotificationPriority::Info => egui::Color32::from_rgb(220, 220, 220),
    }
}

fn priority_icon(priority: NotificationPriority) -> &'static str {
    match priority {
        NotificationPriority::Error => "[!]",
        NotificationPriority::Warning => "[W]",
        NotificationPriority::Info => "[i]",
    }
}

/// Display order: most urgent first, newest first within a priority.
pub fn ticker_order(active: &[Notification]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..active.len()).collect();
    order.sort_by(|&a, &b| {
        let (na, nb) = (&active[a], &active[b]);
        na.priority
            .cmp(&nb.priority)
            .then(nb.created_secs.total_cmp(&na.created_secs))
    });
    order
}

/// Center the camera on a notification's (x, z) location, keeping height.
pub fn focus_camera_on(orbit: &mut OrbitCamera, (x, z): (f32, f32)) {
    orbit.focus.x = x;
    orbit.focus.z = z;
}

pub fn notification_ticker_ui(
    mut contexts: EguiContexts,
    mut log: ResMut<NotificationLog>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if log.active.is_empty() {
        return;
    }

    let mut jump_target: Option<(f32, f32)> = None;
    let mut dismiss_id: Option<u64> = None;

    egui::Area::new(egui::Id::new("notification_ticker"))
        .fixed_pos(egui::pos2(8.0, TICKER_Y_OFFSET))
        .order(egui::Order::Middle)
        .show(contexts.ctx_mut(), |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 220))
                .inner_margin(egui::Margin::symmetric(6, 4))
                .show(ui, |ui| {
                    for idx in ticker_order(&log.active) {
                        let notification = &log.active[idx];
                        ui.horizontal(|ui| {
                            let color = priority_color(notification.priority);
                            let text = egui::RichText::new(format!(
                                "{} {}",
                                priority_icon(notification.priority),
                                notification.text
                            ))
                            .color(color);
                            let response = ui.add(egui::Label::new(text).sense(egui::Sense::click()));
                            if response.clicked() {
                                jump_target = notification.location;
                            }
                            if notification.priority.auto_dismiss_secs().is_none()
                                && ui.small_button("x").clicked()
                            {
                                dismiss_id = Some(notification.id);
                            }
                        });
                    }
                });
        });

    if let Some(id) = dismiss_id {
        log.dismiss(id);
    }
    if let Some(location) = jump_target {
        focus_camera_on(&mut orbit, location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: u64, priority: NotificationPriority, created_secs: f32) -> Notification {
        Notification {
            id,
            text: format!("n{id}"),
            priority,
            location: None,
            created_secs,
            dismissed: false,
        }
    }

    #[test]
    fn test_errors_come_first_then_newest() {
        let active = vec![
            notification(1, NotificationPriority::Info, 1.0),
            notification(2, NotificationPriority::Error, 0.5),
            notification(3, NotificationPriority::Info, 3.0),
            notification(4, NotificationPriority::Warning, 2.0),
        ];
        let ids: Vec<u64> = ticker_order(&active)
            .into_iter()
            .map(|i| active[i].id)
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_focus_keeps_camera_height() {
        let mut orbit = OrbitCamera::default();
        orbit.focus.y = 4.0;
        focus_camera_on(&mut orbit, (3.5, -2.0));
        assert_eq!(orbit.focus, Vec3::new(3.5, 4.0, -2.0));
    }

    #[test]
    fn test_each_priority_has_its_own_color() {
        let colors = [
            priority_color(NotificationPriority::Error),
            priority_color(NotificationPriority::Warning),
            priority_color(NotificationPriority::Info),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
