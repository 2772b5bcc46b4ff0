//! Bridges listener callbacks into Bevy messages.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::input::PointerArgs;

use super::handler::{AnnotationEventHandler, AnnotationEventKind, HandlerResult};

/// An annotation interaction, readable with `MessageReader<AnnotationEvent>`
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct AnnotationEvent {
    pub kind: AnnotationEventKind,
    pub annotation: Entity,
    pub pointer: PointerArgs,
}

/// Listener that queues every event for later delivery as a Bevy message.
///
/// Clones share one queue: register one clone with the dispatcher and keep
/// another to drain.
#[derive(Default, Clone)]
pub struct MessageForwarder {
    queue: Arc<Mutex<Vec<AnnotationEvent>>>,
}

impl MessageForwarder {
    fn enqueue(
        &self,
        kind: AnnotationEventKind,
        annotation: Entity,
        pointer: &PointerArgs,
    ) -> HandlerResult {
        let mut queue = self
            .queue
            .lock()
            .map_err(|e| format!("annotation event queue poisoned: {}", e))?;
        queue.push(AnnotationEvent {
            kind,
            annotation,
            pointer: *pointer,
        });
        Ok(())
    }

    /// Take all queued events in the order they fired
    pub fn drain(&self) -> Vec<AnnotationEvent> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(e) => {
                error!("Annotation event queue poisoned: {}", e);
                Vec::new()
            }
        }
    }
}

impl AnnotationEventHandler for MessageForwarder {
    fn on_click(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        self.enqueue(AnnotationEventKind::Click, annotation, args)
    }

    fn on_hover_enter(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        self.enqueue(AnnotationEventKind::HoverEnter, annotation, args)
    }

    fn on_hover_leave(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        self.enqueue(AnnotationEventKind::HoverLeave, annotation, args)
    }
}

/// The forwarder whose queue is drained into messages each frame
#[derive(Resource, Default, Clone)]
pub struct ForwardedEvents(pub MessageForwarder);
