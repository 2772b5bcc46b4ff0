//! Demo scene for the annotation viewer binary.
//!
//! Spawns a handful of annotations (plain markers, an overlapping pair, a
//! compound annotation built from two child shapes, a route polyline and a
//! round beacon) and tints them from the dispatcher's hover state.

use bevy::prelude::*;

use annotation_events::config::SetHoverEnabledRequest;
use annotation_events::{
    Annotation, AnnotationCamera, AnnotationEvent, AnnotationEventDispatcher, AnnotationEventKind,
    AnnotationEventsSet, PickShape,
};

use crate::theme;

/// How long a clicked annotation stays flashed, in seconds
const CLICK_FLASH_SECONDS: f32 = 0.25;

/// Remaining click flash on an annotation
#[derive(Component)]
struct ClickFlash {
    remaining: f32,
}

/// Annotation drawn with gizmos instead of a sprite
#[derive(Component)]
struct GizmoShape;

fn spawn_scene(mut commands: Commands) {
    commands.spawn((Camera2d, AnnotationCamera));

    let marker = |name: &str, position: Vec2, size: Vec2| {
        (
            Name::new(name.to_string()),
            Annotation,
            Sprite::from_color(theme::ANNOTATION_IDLE, size),
            Transform::from_translation(position.extend(0.0)),
            PickShape::Rect {
                half_size: size / 2.0,
            },
        )
    };

    commands.spawn(marker("Marker", Vec2::new(-400.0, 150.0), Vec2::splat(80.0)));

    // Two annotations overlapping each other: both hover together
    commands.spawn(marker("Overlap low", Vec2::new(-120.0, 150.0), Vec2::splat(120.0)));
    let mut upper = marker("Overlap high", Vec2::new(-60.0, 200.0), Vec2::splat(120.0));
    upper.3.translation.z = 1.0;
    commands.spawn(upper);

    // One annotation, two overlapping child shapes: one click, not two
    commands
        .spawn((
            Name::new("Compound"),
            Annotation,
            Transform::from_xyz(250.0, 150.0, 0.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for offset in [Vec2::new(-30.0, 0.0), Vec2::new(30.0, 0.0)] {
                let size = Vec2::new(100.0, 60.0);
                parent.spawn((
                    Sprite::from_color(theme::ANNOTATION_IDLE, size),
                    Transform::from_translation(offset.extend(0.0)),
                    PickShape::Rect {
                        half_size: size / 2.0,
                    },
                ));
            }
        });

    commands.spawn((
        Name::new("Route"),
        Annotation,
        GizmoShape,
        Transform::from_xyz(0.0, -150.0, 0.0),
        Visibility::default(),
        PickShape::Polyline {
            points: vec![
                Vec2::new(-400.0, 0.0),
                Vec2::new(-150.0, 80.0),
                Vec2::new(100.0, -40.0),
                Vec2::new(350.0, 40.0),
            ],
            width: 6.0,
        },
    ));

    commands.spawn((
        Name::new("Beacon"),
        Annotation,
        GizmoShape,
        Transform::from_xyz(450.0, -200.0, 0.0),
        Visibility::default(),
        PickShape::Sphere { radius: 50.0 },
    ));

    info!("Viewer ready: hover and click annotations, press H to toggle hover tracking");
}

/// Log annotation events and start click flashes
fn react_to_annotation_events(
    mut commands: Commands,
    mut events: MessageReader<AnnotationEvent>,
    names: Query<&Name>,
) {
    for event in events.read() {
        let name = names
            .get(event.annotation)
            .map(|n| n.as_str().to_string())
            .unwrap_or_else(|_| format!("{:?}", event.annotation));

        match event.kind {
            AnnotationEventKind::Click => {
                info!("Clicked {} at {}", name, event.pointer.position);
                if let Ok(mut entity) = commands.get_entity(event.annotation) {
                    entity.insert(ClickFlash {
                        remaining: CLICK_FLASH_SECONDS,
                    });
                }
            }
            AnnotationEventKind::HoverEnter => info!("Hover enter {}", name),
            AnnotationEventKind::HoverLeave => info!("Hover leave {}", name),
        }
    }
}

fn tick_click_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut ClickFlash)>,
) {
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= time.delta_secs();
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<ClickFlash>();
        }
    }
}

fn tint_for(
    annotation: Entity,
    dispatcher: &AnnotationEventDispatcher,
    flashes: &Query<(), With<ClickFlash>>,
) -> Color {
    if flashes.contains(annotation) {
        theme::ANNOTATION_CLICKED
    } else if dispatcher.hovered().contains(annotation) {
        theme::ANNOTATION_HOVERED
    } else {
        theme::ANNOTATION_IDLE
    }
}

/// Tint sprites by the state of the annotation that owns them
fn tint_sprites(
    dispatcher: Res<AnnotationEventDispatcher>,
    flashes: Query<(), With<ClickFlash>>,
    annotations: Query<(), With<Annotation>>,
    mut sprites: Query<(Entity, Option<&ChildOf>, &mut Sprite)>,
) {
    for (entity, parent, mut sprite) in sprites.iter_mut() {
        let owner = if annotations.contains(entity) {
            entity
        } else if let Some(parent) = parent {
            parent.parent()
        } else {
            continue;
        };
        sprite.color = tint_for(owner, &dispatcher, &flashes);
    }
}

fn draw_gizmo_annotations(
    mut gizmos: Gizmos,
    dispatcher: Res<AnnotationEventDispatcher>,
    flashes: Query<(), With<ClickFlash>>,
    shapes: Query<(Entity, &GlobalTransform, &PickShape), With<GizmoShape>>,
) {
    for (entity, transform, shape) in shapes.iter() {
        let origin = transform.translation().truncate();
        let color = tint_for(entity, &dispatcher, &flashes);
        match shape {
            PickShape::Sphere { radius } => {
                gizmos.circle_2d(origin, *radius, color);
            }
            PickShape::Polyline { points, .. } => {
                let color = if color == theme::ANNOTATION_IDLE {
                    theme::ROUTE_COLOR
                } else {
                    color
                };
                gizmos.linestrip_2d(points.iter().map(|p| origin + *p), color);
            }
            PickShape::Rect { half_size } => {
                gizmos.rect_2d(origin, *half_size * 2.0, color);
            }
        }
    }
}

/// Toggle hover tracking with H
fn toggle_hover(
    keyboard: Res<ButtonInput<KeyCode>>,
    dispatcher: Res<AnnotationEventDispatcher>,
    mut requests: MessageWriter<SetHoverEnabledRequest>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        requests.write(SetHoverEnabledRequest {
            enabled: !dispatcher.hover_enabled(),
        });
    }
}

pub struct ViewerPlugin;

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(theme::BACKGROUND))
            .add_systems(Startup, spawn_scene)
            .add_systems(
                Update,
                (
                    react_to_annotation_events,
                    tick_click_flash,
                    tint_sprites,
                    draw_gizmo_annotations,
                )
                    .chain()
                    .after(AnnotationEventsSet),
            )
            .add_systems(Update, toggle_hover.before(AnnotationEventsSet));
    }
}
