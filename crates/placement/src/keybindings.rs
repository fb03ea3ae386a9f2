//! Configurable keyboard shortcuts.
//!
//! Input systems read the `KeyBindings` resource instead of hardcoding
//! `KeyCode` values. Bindings are grouped by category; two actions in the
//! same category may not share a key.

use bevy::prelude::*;

// =============================================================================
// Bindable Action enum
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindableAction {
    // Camera
    CameraPanForward,
    CameraPanBack,
    CameraPanLeft,
    CameraPanRight,
    CameraRotateLeft,
    CameraRotateRight,

    // Building
    ToggleBuildMode,
    ToggleDemolition,
    RotateSelection,
    LevelUp,
    LevelDown,

    // System
    ToggleMenu,
    QuickSave,
    QuickLoad,
    NewGame,
}

impl BindableAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::CameraPanForward => "Camera Forward",
            Self::CameraPanBack => "Camera Back",
            Self::CameraPanLeft => "Camera Left",
            Self::CameraPanRight => "Camera Right",
            Self::CameraRotateLeft => "Camera Rotate Left",
            Self::CameraRotateRight => "Camera Rotate Right",
            Self::ToggleBuildMode => "Toggle Build Mode",
            Self::ToggleDemolition => "Toggle Demolition",
            Self::RotateSelection => "Rotate Object",
            Self::LevelUp => "Level Up",
            Self::LevelDown => "Level Down",
            Self::ToggleMenu => "Menu",
            Self::QuickSave => "Quick Save",
            Self::QuickLoad => "Quick Load",
            Self::NewGame => "New Game",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::CameraPanForward
            | Self::CameraPanBack
            | Self::CameraPanLeft
            | Self::CameraPanRight
            | Self::CameraRotateLeft
            | Self::CameraRotateRight => "Camera",

            Self::ToggleBuildMode
            | Self::ToggleDemolition
            | Self::RotateSelection
            | Self::LevelUp
            | Self::LevelDown => "Building",

            Self::ToggleMenu | Self::QuickSave | Self::QuickLoad | Self::NewGame => "System",
        }
    }

    pub const ALL: &'static [BindableAction] = &[
        Self::CameraPanForward,
        Self::CameraPanBack,
        Self::CameraPanLeft,
        Self::CameraPanRight,
        Self::CameraRotateLeft,
        Self::CameraRotateRight,
        Self::ToggleBuildMode,
        Self::ToggleDemolition,
        Self::RotateSelection,
        Self::LevelUp,
        Self::LevelDown,
        Self::ToggleMenu,
        Self::QuickSave,
        Self::QuickLoad,
        Self::NewGame,
    ];
}

// =============================================================================
// Key binding definition
// =============================================================================

/// A key code plus required modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyBinding {
    pub const fn simple(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    /// Key went down this frame with exactly the required modifiers held.
    pub fn just_pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.just_pressed(self.key) && self.modifiers_match(keys)
    }

    /// Key is held with exactly the required modifiers (continuous actions).
    pub fn pressed(self, keys: &ButtonInput<KeyCode>) -> bool {
        keys.pressed(self.key) && self.modifiers_match(keys)
    }

    fn modifiers_match(self, keys: &ButtonInput<KeyCode>) -> bool {
        let ctrl_held = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
        let shift_held = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
        ctrl_held == self.ctrl && shift_held == self.shift
    }

    /// e.g. "Ctrl+N", "PgUp".
    pub fn display_label(self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(keycode_label(self.key));
        parts.join("+")
    }
}

// =============================================================================
// KeyBindings resource
// =============================================================================

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub camera_pan_forward: KeyBinding,
    pub camera_pan_back: KeyBinding,
    pub camera_pan_left: KeyBinding,
    pub camera_pan_right: KeyBinding,
    pub camera_rotate_left: KeyBinding,
    pub camera_rotate_right: KeyBinding,

    pub toggle_build_mode: KeyBinding,
    pub toggle_demolition: KeyBinding,
    pub rotate_selection: KeyBinding,
    pub level_up: KeyBinding,
    pub level_down: KeyBinding,

    pub toggle_menu: KeyBinding,
    pub quick_save: KeyBinding,
    pub quick_load: KeyBinding,
    pub new_game: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            camera_pan_forward: KeyBinding::simple(KeyCode::KeyW),
            camera_pan_back: KeyBinding::simple(KeyCode::KeyS),
            camera_pan_left: KeyBinding::simple(KeyCode::KeyA),
            camera_pan_right: KeyBinding::simple(KeyCode::KeyD),
            camera_rotate_left: KeyBinding::simple(KeyCode::KeyQ),
            camera_rotate_right: KeyBinding::simple(KeyCode::KeyE),
            toggle_build_mode: KeyBinding::simple(KeyCode::KeyB),
            toggle_demolition: KeyBinding::simple(KeyCode::Delete),
            rotate_selection: KeyBinding::simple(KeyCode::KeyR),
            level_up: KeyBinding::simple(KeyCode::PageUp),
            level_down: KeyBinding::simple(KeyCode::PageDown),
            toggle_menu: KeyBinding::simple(KeyCode::Escape),
            quick_save: KeyBinding::simple(KeyCode::F5),
            quick_load: KeyBinding::simple(KeyCode::F9),
            new_game: KeyBinding::ctrl(KeyCode::KeyN),
        }
    }
}

impl KeyBindings {
    pub fn get(&self, action: BindableAction) -> KeyBinding {
        match action {
            BindableAction::CameraPanForward => self.camera_pan_forward,
            BindableAction::CameraPanBack => self.camera_pan_back,
            BindableAction::CameraPanLeft => self.camera_pan_left,
            BindableAction::CameraPanRight => self.camera_pan_right,
            BindableAction::CameraRotateLeft => self.camera_rotate_left,
            BindableAction::CameraRotateRight => self.camera_rotate_right,
            BindableAction::ToggleBuildMode => self.toggle_build_mode,
            BindableAction::ToggleDemolition => self.toggle_demolition,
            BindableAction::RotateSelection => self.rotate_selection,
            BindableAction::LevelUp => self.level_up,
            BindableAction::LevelDown => self.level_down,
            BindableAction::ToggleMenu => self.toggle_menu,
            BindableAction::QuickSave => self.quick_save,
            BindableAction::QuickLoad => self.quick_load,
            BindableAction::NewGame => self.new_game,
        }
    }

    /// Pairs of actions in the same category that share a binding.
    pub fn find_conflicts(&self) -> Vec<(BindableAction, BindableAction)> {
        let mut conflicts = Vec::new();
        let all = BindableAction::ALL;
        for (i, &a) in all.iter().enumerate() {
            for &b in &all[i + 1..] {
                if a.category() == b.category() && self.get(a) == self.get(b) {
                    conflicts.push((a, b));
                }
            }
        }
        conflicts
    }
}

pub(crate) fn warn_key_conflicts(bindings: Res<KeyBindings>) {
    for (a, b) in bindings.find_conflicts() {
        warn!(
            "Key binding conflict: '{}' and '{}' both use {}",
            a.label(),
            b.label(),
            bindings.get(a).display_label()
        );
    }
}

pub fn keycode_label(key: KeyCode) -> &'static str {
    match key {
        KeyCode::KeyA => "A",
        KeyCode::KeyB => "B",
        KeyCode::KeyD => "D",
        KeyCode::KeyE => "E",
        KeyCode::KeyN => "N",
        KeyCode::KeyQ => "Q",
        KeyCode::KeyR => "R",
        KeyCode::KeyS => "S",
        KeyCode::KeyW => "W",
        KeyCode::F5 => "F5",
        KeyCode::F9 => "F9",
        KeyCode::Escape => "Esc",
        KeyCode::Delete => "Delete",
        KeyCode::Backspace => "Backspace",
        KeyCode::PageUp => "PgUp",
        KeyCode::PageDown => "PgDn",
        KeyCode::ArrowUp => "Up",
        KeyCode::ArrowDown => "Down",
        KeyCode::ArrowLeft => "Left",
        KeyCode::ArrowRight => "Right",
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keybindings_have_no_conflicts() {
        let conflicts = KeyBindings::default().find_conflicts();
        assert!(conflicts.is_empty(), "unexpected conflicts: {:?}", conflicts);
    }

    #[test]
    fn test_default_building_keys() {
        let kb = KeyBindings::default();
        assert_eq!(kb.get(BindableAction::RotateSelection).key, KeyCode::KeyR);
        assert_eq!(kb.get(BindableAction::ToggleBuildMode).key, KeyCode::KeyB);
        assert_eq!(kb.get(BindableAction::LevelUp).key, KeyCode::PageUp);
        assert_eq!(kb.get(BindableAction::LevelDown).key, KeyCode::PageDown);
        assert_eq!(kb.get(BindableAction::ToggleDemolition).key, KeyCode::Delete);
        assert_eq!(kb.get(BindableAction::QuickSave).key, KeyCode::F5);
        assert_eq!(kb.get(BindableAction::QuickLoad).key, KeyCode::F9);
    }

    #[test]
    fn test_conflict_detection() {
        let kb = KeyBindings {
            level_up: KeyBinding::simple(KeyCode::KeyR),
            ..Default::default()
        };
        let conflicts = kb.find_conflicts();
        assert!(conflicts.contains(&(BindableAction::RotateSelection, BindableAction::LevelUp)));
    }

    #[test]
    fn test_display_label() {
        assert_eq!(KeyBinding::simple(KeyCode::PageUp).display_label(), "PgUp");
        assert_eq!(KeyBinding::ctrl(KeyCode::KeyN).display_label(), "Ctrl+N");
    }

    #[test]
    fn test_just_pressed_checks_modifiers() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyN);
        assert!(!KeyBinding::ctrl(KeyCode::KeyN).just_pressed(&keys));
        assert!(KeyBinding::simple(KeyCode::KeyN).just_pressed(&keys));

        keys.press(KeyCode::ControlLeft);
        assert!(KeyBinding::ctrl(KeyCode::KeyN).just_pressed(&keys));
        assert!(KeyBinding::ctrl(KeyCode::KeyN).pressed(&keys));
    }
}
