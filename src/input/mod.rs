//! Raw pointer input: the event model and its collection from Bevy.
//!
//! - [`events`] - Raw event records, button/modifier masks, pointer snapshot
//! - [`collect`] - Per-frame collection of window input into [`PendingInput`]

mod collect;
mod events;

pub use collect::{collect_pointer_input, CollectorState, PendingInput};
pub use events::{ButtonMask, ModifierMask, PointerArgs, RawEventKind, RawInputEvent};
