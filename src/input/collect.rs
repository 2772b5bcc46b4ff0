//! Translation of Bevy window input into raw pointer events.

use bevy::input::ButtonState;
use bevy::input::mouse::MouseButtonInput;
use bevy::prelude::*;
use bevy::window::CursorMoved;

use super::events::{ButtonMask, ModifierMask, RawInputEvent};

/// Raw events gathered during the current frame, in arrival order
#[derive(Resource, Default, Debug)]
pub struct PendingInput {
    events: Vec<RawInputEvent>,
}

impl PendingInput {
    pub fn push(&mut self, event: RawInputEvent) {
        self.events.push(event);
    }

    /// Drain the buffered events, preserving order
    pub fn take(&mut self) -> Vec<RawInputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Pointer bookkeeping that persists between frames of collection
#[derive(Default)]
pub struct CollectorState {
    last_position: Vec2,
    held: ButtonMask,
}

impl CollectorState {
    /// Record a cursor move; a move with any button held is a drag
    pub fn cursor_moved(&mut self, position: Vec2) -> RawInputEvent {
        self.last_position = position;
        if self.held.is_empty() {
            RawInputEvent::moved(position)
        } else {
            RawInputEvent::dragged(position)
        }
    }

    /// Record a button transition at the last known cursor position
    pub fn button_changed(
        &mut self,
        button: MouseButton,
        state: ButtonState,
        modifiers: ModifierMask,
    ) -> RawInputEvent {
        let bit = ButtonMask::from_mouse_button(button);
        match state {
            ButtonState::Pressed => {
                self.held.insert(bit);
                RawInputEvent::pressed(self.last_position, self.held, modifiers)
            }
            ButtonState::Released => {
                self.held.remove(bit);
                RawInputEvent::released(self.last_position, self.held, modifiers)
            }
        }
    }
}

/// Collect cursor and mouse button messages into the pending batch.
///
/// Cursor moves are queued before button transitions of the same frame,
/// so a press always sees the latest cursor position.
pub fn collect_pointer_input(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut mouse_buttons: MessageReader<MouseButtonInput>,
    keys: Res<ButtonInput<KeyCode>>,
    mut state: Local<CollectorState>,
    mut pending: ResMut<PendingInput>,
) {
    for moved in cursor_moved.read() {
        pending.push(state.cursor_moved(moved.position));
    }

    let modifiers = ModifierMask::from_keys(&keys);
    for input in mouse_buttons.read() {
        pending.push(state.button_changed(input.button, input.state, modifiers));
    }
}
