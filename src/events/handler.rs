//! Listener capability surface and ordered fan-out.

use std::sync::Arc;

use bevy::prelude::*;

use crate::input::PointerArgs;

/// Outcome of one listener callback. An error is logged and does not stop
/// delivery to the remaining listeners.
pub type HandlerResult = Result<(), String>;

/// The three listener-facing event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationEventKind {
    Click,
    HoverEnter,
    HoverLeave,
}

impl AnnotationEventKind {
    pub fn label(self) -> &'static str {
        match self {
            AnnotationEventKind::Click => "click",
            AnnotationEventKind::HoverEnter => "hover-enter",
            AnnotationEventKind::HoverLeave => "hover-leave",
        }
    }
}

/// Receives annotation interaction events. All callbacks default to no-ops.
pub trait AnnotationEventHandler: Send + Sync {
    fn on_click(&self, _annotation: Entity, _args: &PointerArgs) -> HandlerResult {
        Ok(())
    }

    fn on_hover_enter(&self, _annotation: Entity, _args: &PointerArgs) -> HandlerResult {
        Ok(())
    }

    fn on_hover_leave(&self, _annotation: Entity, _args: &PointerArgs) -> HandlerResult {
        Ok(())
    }
}

/// Shared-ownership listener handle
pub type SharedHandler = Arc<dyn AnnotationEventHandler>;

/// Listeners in registration order
#[derive(Default, Clone)]
pub struct HandlerList {
    handlers: Vec<SharedHandler>,
}

impl HandlerList {
    /// Append a listener; `None` is ignored
    pub fn push(&mut self, handler: Option<SharedHandler>) {
        if let Some(handler) = handler {
            self.handlers.push(handler);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every listener for one event, in registration order
    pub fn fire(&self, kind: AnnotationEventKind, annotation: Entity, args: &PointerArgs) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = match kind {
                AnnotationEventKind::Click => handler.on_click(annotation, args),
                AnnotationEventKind::HoverEnter => handler.on_hover_enter(annotation, args),
                AnnotationEventKind::HoverLeave => handler.on_hover_leave(annotation, args),
            };
            if let Err(reason) = result {
                warn!(
                    "Annotation {} handler #{} failed for {:?}: {}",
                    kind.label(),
                    index,
                    annotation,
                    reason
                );
            }
        }
    }
}

/// Logs every annotation event at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl AnnotationEventHandler for LoggingHandler {
    fn on_click(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        debug!(
            "Annotation {:?} clicked at {} (buttons {:?}, modifiers {:?})",
            annotation, args.position, args.buttons, args.modifiers
        );
        Ok(())
    }

    fn on_hover_enter(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        debug!("Annotation {:?} hovered at {}", annotation, args.position);
        Ok(())
    }

    fn on_hover_leave(&self, annotation: Entity, args: &PointerArgs) -> HandlerResult {
        debug!("Annotation {:?} unhovered at {}", annotation, args.position);
        Ok(())
    }
}
