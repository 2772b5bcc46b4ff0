//! Click and hover events for interactive annotations in a Bevy scene.
//!
//! A raw, time-ordered pointer stream (move, drag, press, release, tick) is
//! turned into deduplicated annotation events: click, hover-enter and
//! hover-leave. Listeners implement [`events::AnnotationEventHandler`] or
//! read [`events::AnnotationEvent`] messages.
//!
//! ## Modules
//!
//! - [`input`] - Raw pointer events and their collection from window input
//! - [`picking`] - Pick adapter: screen position to annotations under it
//! - [`events`] - Dispatcher, hover set, listener fan-out, plugin
//! - [`config`] - Persisted settings (hover tracking, event logging)
//! - [`paths`] - Platform paths for settings and logs

pub mod config;
pub mod constants;
pub mod events;
pub mod input;
pub mod paths;
pub mod picking;

pub use config::ConfigPlugin;
pub use events::{
    AnnotationEvent, AnnotationEventDispatcher, AnnotationEventHandler, AnnotationEventKind,
    AnnotationEventsPlugin, AnnotationEventsSet,
};
pub use picking::{Annotation, AnnotationCamera, PickShape};
