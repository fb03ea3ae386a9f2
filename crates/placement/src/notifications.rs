//! Player-facing notifications.
//!
//! Systems emit `NotificationEvent`s for things the player should see (a
//! failed save, a missing model). They are collected into `NotificationLog`,
//! whose active entries the HUD shows until they expire or are dismissed.

use bevy::prelude::*;

// =============================================================================
// Priority Levels
// =============================================================================

/// Notification priority, from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationPriority {
    /// Persists until dismissed.
    Error,
    Warning,
    Info,
}

impl NotificationPriority {
    /// Seconds before the notification leaves the active list. `None` means
    /// persist until dismissed.
    pub fn auto_dismiss_secs(&self) -> Option<f32> {
        match self {
            NotificationPriority::Error => None,
            NotificationPriority::Warning => Some(8.0),
            NotificationPriority::Info => Some(4.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationPriority::Error => "ERROR",
            NotificationPriority::Warning => "WARNING",
            NotificationPriority::Info => "INFO",
        }
    }
}

// =============================================================================
// Notification Struct
// =============================================================================

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    pub priority: NotificationPriority,
    /// Optional world-space location (x, z).
    pub location: Option<(f32, f32)>,
    /// Elapsed app time when the notification was created.
    pub created_secs: f32,
    pub dismissed: bool,
}

// =============================================================================
// Bevy Event
// =============================================================================

/// Event emitted by other systems to create a notification.
///
/// # Example
/// ```ignore
/// fn my_system(mut events: EventWriter<NotificationEvent>) {
///     events.send(NotificationEvent::warning("Model 'Crate' is missing"));
/// }
/// ```
#[derive(Event, Debug, Clone)]
pub struct NotificationEvent {
    pub text: String,
    pub priority: NotificationPriority,
    pub location: Option<(f32, f32)>,
}

impl NotificationEvent {
    pub fn new(text: impl Into<String>, priority: NotificationPriority) -> Self {
        Self {
            text: text.into(),
            priority,
            location: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NotificationPriority::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, NotificationPriority::Warning)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NotificationPriority::Info)
    }

    pub fn at(mut self, x: f32, z: f32) -> Self {
        self.location = Some((x, z));
        self
    }
}

// =============================================================================
// NotificationLog Resource
// =============================================================================

/// Notifications currently on screen.
#[derive(Resource)]
pub struct NotificationLog {
    pub active: Vec<Notification>,
    next_id: u64,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            next_id: 1,
        }
    }
}

impl NotificationLog {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a notification. Returns its id.
    pub fn push(&mut self, event: &NotificationEvent, now_secs: f32) -> u64 {
        let id = self.next_id();
        self.active.push(Notification {
            id,
            text: event.text.clone(),
            priority: event.priority,
            location: event.location,
            created_secs: now_secs,
            dismissed: false,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        if let Some(n) = self.active.iter_mut().find(|n| n.id == id) {
            n.dismissed = true;
        }
    }

    /// Remove dismissed and expired notifications from the active list.
    pub fn sweep(&mut self, now_secs: f32) {
        self.active.retain(|n| {
            if n.dismissed {
                return false;
            }
            match n.priority.auto_dismiss_secs() {
                Some(ttl) => now_secs - n.created_secs < ttl,
                None => true,
            }
        });
    }

    /// The most recent notification still on screen.
    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }
}

// =============================================================================
// Systems
// =============================================================================

pub(crate) fn collect_notifications(
    mut events: EventReader<NotificationEvent>,
    mut log: ResMut<NotificationLog>,
    time: Res<Time>,
) {
    for event in events.read() {
        log.push(event, time.elapsed_secs());
    }
}

pub(crate) fn sweep_expired_notifications(mut log: ResMut<NotificationLog>, time: Res<Time>) {
    if log.active.is_empty() {
        return;
    }
    log.sweep(time.elapsed_secs());
}
