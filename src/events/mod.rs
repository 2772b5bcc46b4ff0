//! Annotation event dispatch: clicks and hover transitions.
//!
//! Raw pointer events collected by [`crate::input`] are classified by the
//! [`AnnotationEventDispatcher`], which drives the pick adapter from
//! [`crate::picking`] and fans results out to registered listeners.
//!
//! ## Module Structure
//!
//! - [`dispatcher`] - Pointer state, mouse-down flag and event classification
//! - [`hover`] - Hover set and the enter/leave transition
//! - [`handler`] - Listener trait, ordered fan-out, logging listener
//! - [`messages`] - Forwarding listener events into Bevy messages
//! - [`systems`] - Frame systems tying input, dispatcher and messages together
//!
//! ## Event Order
//!
//! Within one tick all hover-enter events fire (pick order) before any
//! hover-leave event (hover set insertion order). Every listener sees
//! every event, in registration order.

mod dispatcher;
mod handler;
mod hover;
mod messages;
mod systems;


pub use dispatcher::AnnotationEventDispatcher;
pub use handler::{
    AnnotationEventHandler, AnnotationEventKind, HandlerList, HandlerResult, LoggingHandler,
    SharedHandler,
};
pub use hover::{HoverSet, HoverTransition};
pub use messages::{AnnotationEvent, ForwardedEvents, MessageForwarder};
pub use systems::{dispatch_annotation_events, forward_annotation_messages};

use std::sync::Arc;

use bevy::prelude::*;

use crate::input::{collect_pointer_input, PendingInput};

/// System set containing input collection, dispatch and message forwarding.
/// Order systems `.after(AnnotationEventsSet)` to read this frame's events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationEventsSet;

pub struct AnnotationEventsPlugin;

impl Plugin for AnnotationEventsPlugin {
    fn build(&self, app: &mut App) {
        let forwarded = ForwardedEvents::default();
        let handler: SharedHandler = Arc::new(forwarded.0.clone());

        app.init_resource::<PendingInput>()
            .insert_resource(AnnotationEventDispatcher::with_handler(handler))
            .insert_resource(forwarded)
            .add_message::<AnnotationEvent>()
            .add_systems(
                Update,
                (
                    collect_pointer_input,
                    dispatch_annotation_events,
                    forward_annotation_messages,
                )
                    .chain()
                    .in_set(AnnotationEventsSet),
            );
    }
}
