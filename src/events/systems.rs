//! Per-frame systems that feed the dispatcher and publish its output.

use bevy::prelude::*;

use crate::input::{PendingInput, RawInputEvent};
use crate::picking::{AnnotationCamera, AnnotationScene, CameraView};

use super::dispatcher::AnnotationEventDispatcher;
use super::messages::{AnnotationEvent, ForwardedEvents};

/// Run this frame's raw events plus one tick through the dispatcher.
pub fn dispatch_annotation_events(
    mut pending: ResMut<PendingInput>,
    mut dispatcher: ResMut<AnnotationEventDispatcher>,
    scene: AnnotationScene,
    cameras: Query<(&Camera, &GlobalTransform), With<AnnotationCamera>>,
) {
    let mut batch = pending.take();
    batch.push(RawInputEvent::tick());

    // Without a single annotation camera every pick comes back empty, but
    // pointer state still advances
    let view = cameras
        .single()
        .ok()
        .map(|(camera, transform)| CameraView { camera, transform });

    dispatcher.process(&batch, &scene, &view);
}

/// Publish events queued by the forwarder as Bevy messages
pub fn forward_annotation_messages(
    forwarded: Res<ForwardedEvents>,
    mut writer: MessageWriter<AnnotationEvent>,
) {
    for event in forwarded.0.drain() {
        writer.write(event);
    }
}
