//! Raw pointer event records consumed by the dispatcher.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of a raw pointer event.
///
/// `Other` covers anything this crate does not interpret (scroll, keys,
/// kinds added by newer hosts). Unknown names in serialized batches
/// deserialize to `Other` and are ignored by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawEventKind {
    Move,
    Drag,
    Down,
    Up,
    Tick,
    #[serde(other)]
    Other,
}

/// Mouse button bit mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const MIDDLE: Self = Self(1 << 1);
    pub const RIGHT: Self = Self(1 << 2);

    /// Bit for a Bevy mouse button. Back/forward/other buttons have no bit.
    pub fn from_mouse_button(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Right => Self::RIGHT,
            _ => Self::NONE,
        }
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

/// Modifier key bit mask. Left and right variants share a bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(pub u32);

impl ModifierMask {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);

    /// Read the currently held modifier keys
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let mut mask = Self::NONE;
        let pairs = [
            (KeyCode::ShiftLeft, KeyCode::ShiftRight, Self::SHIFT),
            (KeyCode::ControlLeft, KeyCode::ControlRight, Self::CTRL),
            (KeyCode::AltLeft, KeyCode::AltRight, Self::ALT),
            (KeyCode::SuperLeft, KeyCode::SuperRight, Self::SUPER),
        ];
        for (left, right, bit) in pairs {
            if keys.any_pressed([left, right]) {
                mask.0 |= bit.0;
            }
        }
        mask
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// One raw pointer event as delivered by the host windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputEvent {
    pub kind: RawEventKind,
    /// Screen-space position in logical pixels
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub buttons: ButtonMask,
    #[serde(default)]
    pub modifiers: ModifierMask,
}

impl RawInputEvent {
    fn new(kind: RawEventKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            buttons: ButtonMask::NONE,
            modifiers: ModifierMask::NONE,
        }
    }

    pub fn moved(position: Vec2) -> Self {
        Self::new(RawEventKind::Move, position)
    }

    pub fn dragged(position: Vec2) -> Self {
        Self::new(RawEventKind::Drag, position)
    }

    pub fn pressed(position: Vec2, buttons: ButtonMask, modifiers: ModifierMask) -> Self {
        Self {
            kind: RawEventKind::Down,
            position,
            buttons,
            modifiers,
        }
    }

    pub fn released(position: Vec2, buttons: ButtonMask, modifiers: ModifierMask) -> Self {
        Self {
            kind: RawEventKind::Up,
            position,
            buttons,
            modifiers,
        }
    }

    /// Per-frame evaluation opportunity
    pub fn tick() -> Self {
        Self::new(RawEventKind::Tick, Vec2::ZERO)
    }
}

/// Snapshot of the pointer handed to every listener callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerArgs {
    pub position: Vec2,
    pub buttons: ButtonMask,
    pub modifiers: ModifierMask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask_insert_remove() {
        let mut mask = ButtonMask::NONE;
        mask.insert(ButtonMask::LEFT);
        mask.insert(ButtonMask::RIGHT);
        assert!(mask.contains(ButtonMask::LEFT));
        assert!(mask.contains(ButtonMask::RIGHT));
        assert!(!mask.contains(ButtonMask::MIDDLE));

        mask.remove(ButtonMask::LEFT);
        assert_eq!(mask, ButtonMask::RIGHT);
        mask.remove(ButtonMask::RIGHT);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_button_mask_from_mouse_button() {
        assert_eq!(ButtonMask::from_mouse_button(MouseButton::Left), ButtonMask::LEFT);
        assert_eq!(ButtonMask::from_mouse_button(MouseButton::Middle), ButtonMask::MIDDLE);
        assert_eq!(ButtonMask::from_mouse_button(MouseButton::Right), ButtonMask::RIGHT);
        assert_eq!(ButtonMask::from_mouse_button(MouseButton::Back), ButtonMask::NONE);
    }

    #[test]
    fn test_modifier_mask_collapses_left_and_right() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ShiftRight);
        keys.press(KeyCode::ControlLeft);

        let mask = ModifierMask::from_keys(&keys);
        assert!(mask.contains(ModifierMask::SHIFT));
        assert!(mask.contains(ModifierMask::CTRL));
        assert!(!mask.contains(ModifierMask::ALT));
        assert!(!mask.contains(ModifierMask::SUPER));
    }

    #[test]
    fn test_unknown_kind_deserializes_to_other() {
        let json = r#"[
            {"kind": "move", "position": [10.0, 20.0]},
            {"kind": "scroll", "position": [0.0, 0.0]},
            {"kind": "down", "position": [10.0, 20.0], "buttons": 1, "modifiers": 2}
        ]"#;
        let events: Vec<RawInputEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, RawEventKind::Move);
        assert_eq!(events[1].kind, RawEventKind::Other);
        assert_eq!(events[2].kind, RawEventKind::Down);
        assert_eq!(events[2].buttons, ButtonMask::LEFT);
        assert_eq!(events[2].modifiers, ModifierMask::CTRL);
    }

    #[test]
    fn test_tick_carries_no_buttons() {
        let tick = RawInputEvent::tick();
        assert_eq!(tick.kind, RawEventKind::Tick);
        assert!(tick.buttons.is_empty());
    }
}
