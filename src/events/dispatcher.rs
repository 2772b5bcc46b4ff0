//! Stateful classification of raw pointer events into annotation events.

use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::constants::DEFAULT_HOVER_ENABLED;
use crate::input::{PointerArgs, RawEventKind, RawInputEvent};
use crate::picking::Picker;

use super::handler::{AnnotationEventKind, HandlerList, SharedHandler};
use super::hover::HoverSet;

/// Turns a raw pointer stream into click and hover events for annotations.
///
/// Owns pointer state, the mouse-down flag, the hover set and the listener
/// list. Events are processed strictly in order; state is updated before
/// any listener of the same event runs.
#[derive(Resource, Clone)]
pub struct AnnotationEventDispatcher {
    pointer: PointerArgs,
    mouse_down: bool,
    hover_enabled: bool,
    hovered: HoverSet,
    handlers: HandlerList,
}

impl Default for AnnotationEventDispatcher {
    fn default() -> Self {
        Self {
            pointer: PointerArgs::default(),
            mouse_down: false,
            hover_enabled: DEFAULT_HOVER_ENABLED,
            hovered: HoverSet::default(),
            handlers: HandlerList::default(),
        }
    }
}

impl AnnotationEventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with one initial listener (`None` registers nothing)
    pub fn with_handler(handler: impl Into<Option<SharedHandler>>) -> Self {
        let mut dispatcher = Self::default();
        dispatcher.add_handler(handler);
        dispatcher
    }

    /// Append a listener. Registering `None` is a no-op.
    pub fn add_handler(&mut self, handler: impl Into<Option<SharedHandler>>) {
        self.handlers.push(handler.into());
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn hover_enabled(&self) -> bool {
        self.hover_enabled
    }

    /// Toggle hover tracking. The hover set is kept as-is while disabled.
    pub fn set_hover_enabled(&mut self, enabled: bool) {
        self.hover_enabled = enabled;
    }

    pub fn pointer(&self) -> &PointerArgs {
        &self.pointer
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn hovered(&self) -> &HoverSet {
        &self.hovered
    }

    /// Process one batch of raw events against `scene` seen through `view`.
    pub fn process<V, P>(&mut self, events: &[RawInputEvent], scene: &P, view: &V)
    where
        V: ?Sized,
        P: Picker<V> + ?Sized,
    {
        for event in events {
            self.process_event(event, scene, view);
        }
    }

    fn process_event<V, P>(&mut self, event: &RawInputEvent, scene: &P, view: &V)
    where
        V: ?Sized,
        P: Picker<V> + ?Sized,
    {
        match event.kind {
            RawEventKind::Move | RawEventKind::Drag => {
                self.pointer.position = event.position;
            }
            RawEventKind::Down => {
                self.mouse_down = true;
                self.pointer = PointerArgs {
                    position: event.position,
                    buttons: event.buttons,
                    modifiers: event.modifiers,
                };

                for annotation in self.annotations_under_pointer(scene, view) {
                    self.handlers
                        .fire(AnnotationEventKind::Click, annotation, &self.pointer);
                }
            }
            RawEventKind::Up => {
                self.mouse_down = false;
            }
            RawEventKind::Tick => {
                if self.hover_enabled && !self.mouse_down {
                    self.update_hover(scene, view);
                }
            }
            RawEventKind::Other => {
                trace!("Ignoring unrecognized raw event at {}", event.position);
            }
        }
    }

    /// Pick at the pointer and resolve hits to distinct annotations, keeping
    /// the first occurrence in pick order.
    fn annotations_under_pointer<V, P>(&self, scene: &P, view: &V) -> Vec<Entity>
    where
        V: ?Sized,
        P: Picker<V> + ?Sized,
    {
        let mut seen = EntityHashSet::default();
        scene
            .pick(view, self.pointer.position)
            .iter()
            .filter_map(|hit| scene.resolve(hit))
            .filter(|annotation| seen.insert(*annotation))
            .collect()
    }

    fn update_hover<V, P>(&mut self, scene: &P, view: &V)
    where
        V: ?Sized,
        P: Picker<V> + ?Sized,
    {
        let currently_hit = self.annotations_under_pointer(scene, view);
        let transition = self.hovered.apply(&currently_hit);

        // Enters first in pick order, then leaves in hover set order
        for annotation in transition.entered {
            self.handlers
                .fire(AnnotationEventKind::HoverEnter, annotation, &self.pointer);
        }
        for annotation in transition.left {
            self.handlers
                .fire(AnnotationEventKind::HoverLeave, annotation, &self.pointer);
        }
    }
}
