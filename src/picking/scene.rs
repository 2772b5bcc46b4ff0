//! Pick adapter over the ECS world.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::hit::{Hit, Picker, ViewRay};
use super::shapes::PickShape;

/// Marks an interactive annotation. Pick shapes on this entity or on any
/// of its descendants resolve to it.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Annotation;

/// Marks the camera whose view drives annotation picking
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct AnnotationCamera;

/// A camera and its transform, borrowed for one frame of picking.
#[derive(Clone, Copy)]
pub struct CameraView<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl ViewRay for CameraView<'_> {
    fn viewport_ray(&self, position: Vec2) -> Option<Ray3d> {
        self.camera.viewport_to_world(self.transform, position).ok()
    }
}

/// Read-only access to every pickable node and the annotation hierarchy.
#[derive(SystemParam)]
pub struct AnnotationScene<'w, 's> {
    shapes: Query<
        'w,
        's,
        (
            Entity,
            &'static GlobalTransform,
            &'static PickShape,
            Option<&'static InheritedVisibility>,
        ),
    >,
    annotations: Query<'w, 's, (), With<Annotation>>,
    parents: Query<'w, 's, &'static ChildOf>,
}

impl AnnotationScene<'_, '_> {
    /// Cast a world-space ray against all visible shapes, nearest first
    pub fn pick_ray(&self, ray: Ray3d) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .shapes
            .iter()
            .filter(|(_, _, _, visibility)| visibility.is_none_or(|v| v.get()))
            .filter_map(|(entity, transform, shape, _)| {
                let inverse = transform.affine().inverse();
                let local_origin = inverse.transform_point3(ray.origin);
                let local_direction = inverse.transform_vector3(*ray.direction);
                let distance = shape.intersect_local(local_origin, local_direction)?;
                Some(Hit {
                    entity,
                    distance,
                    point: ray.get_point(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

impl<V: ViewRay + ?Sized> Picker<V> for AnnotationScene<'_, '_> {
    fn pick(&self, view: &V, position: Vec2) -> Vec<Hit> {
        match view.viewport_ray(position) {
            Some(ray) => self.pick_ray(ray),
            None => Vec::new(),
        }
    }

    fn resolve(&self, hit: &Hit) -> Option<Entity> {
        let mut current = hit.entity;
        loop {
            if self.annotations.contains(current) {
                return Some(current);
            }
            current = self.parents.get(current).ok()?.parent();
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::SystemState;

    use super::*;

    /// Orthographic view looking down -Z from z = 100
    struct TopDownView;

    impl ViewRay for TopDownView {
        fn viewport_ray(&self, position: Vec2) -> Option<Ray3d> {
            Some(Ray3d::new(position.extend(100.0), Dir3::NEG_Z))
        }
    }

    fn rect(half: f32) -> PickShape {
        PickShape::Rect {
            half_size: Vec2::splat(half),
        }
    }

    #[test]
    fn test_pick_orders_hits_nearest_first() {
        let mut world = World::new();
        let low = world
            .spawn((rect(10.0), GlobalTransform::from_translation(Vec3::new(0.0, 0.0, 1.0))))
            .id();
        let high = world
            .spawn((rect(10.0), GlobalTransform::from_translation(Vec3::new(0.0, 0.0, 5.0))))
            .id();

        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);
        let hits = scene.pick(&TopDownView, Vec2::ZERO);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, high);
        assert_eq!(hits[1].entity, low);
        assert_eq!(hits[0].distance, 95.0);
        assert_eq!(hits[0].point, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_pick_respects_node_transform() {
        let mut world = World::new();
        let shape = world
            .spawn((rect(5.0), GlobalTransform::from_translation(Vec3::new(100.0, 0.0, 0.0))))
            .id();

        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);

        assert!(scene.pick(&TopDownView, Vec2::ZERO).is_empty());
        let hits = scene.pick(&TopDownView, Vec2::new(103.0, 2.0));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, shape);
    }

    #[test]
    fn test_hidden_shapes_are_not_picked() {
        let mut world = World::new();
        world.spawn((rect(10.0), GlobalTransform::IDENTITY, InheritedVisibility::HIDDEN));
        let visible = world
            .spawn((rect(10.0), GlobalTransform::IDENTITY, InheritedVisibility::VISIBLE))
            .id();

        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);
        let hits = scene.pick(&TopDownView, Vec2::ZERO);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entity, visible);
    }

    #[test]
    fn test_resolve_walks_up_to_annotation() {
        let mut world = World::new();
        let annotation = world.spawn((Annotation, GlobalTransform::IDENTITY)).id();
        let child = world
            .spawn((rect(10.0), GlobalTransform::IDENTITY, ChildOf(annotation)))
            .id();
        let grandchild = world
            .spawn((
                PickShape::Sphere { radius: 1.0 },
                GlobalTransform::IDENTITY,
                ChildOf(child),
            ))
            .id();
        let stray = world.spawn((rect(10.0), GlobalTransform::IDENTITY)).id();

        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);
        let hit_on = |entity| Hit {
            entity,
            distance: 0.0,
            point: Vec3::ZERO,
        };

        assert_eq!(scene.resolve(&hit_on(child)), Some(annotation));
        assert_eq!(scene.resolve(&hit_on(grandchild)), Some(annotation));
        assert_eq!(scene.resolve(&hit_on(annotation)), Some(annotation));
        assert_eq!(scene.resolve(&hit_on(stray)), None);
    }

    #[test]
    fn test_missing_view_yields_no_hits() {
        let mut world = World::new();
        world.spawn((rect(10.0), GlobalTransform::IDENTITY));

        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);
        let view: Option<TopDownView> = None;

        assert!(scene.pick(&view, Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_empty_scene_yields_no_hits() {
        let mut world = World::new();
        let mut state: SystemState<AnnotationScene> = SystemState::new(&mut world);
        let scene = state.get(&world);

        assert!(scene.pick(&TopDownView, Vec2::ZERO).is_empty());
    }
}
