//! Pick query results and the adapter traits the dispatcher drives.

use bevy::prelude::*;

/// A single intersection returned by a pick query.
///
/// Only `entity` matters to the dispatcher; distance and point let the
/// picker order overlapping geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Scene node whose geometry was hit
    pub entity: Entity,
    /// Distance along the view ray
    pub distance: f32,
    /// World-space intersection point
    pub point: Vec3,
}

/// Spatial query over a scene, viewed through `V`.
///
/// Implementations must be side-effect free and reflect the scene as it is
/// at call time.
pub trait Picker<V: ?Sized> {
    /// Hits under the screen position, nearest first
    fn pick(&self, view: &V, position: Vec2) -> Vec<Hit>;

    /// The annotation that owns the hit node, if any
    fn resolve(&self, hit: &Hit) -> Option<Entity>;
}

/// View context that turns a screen position into a world-space ray.
pub trait ViewRay {
    fn viewport_ray(&self, position: Vec2) -> Option<Ray3d>;
}

impl<T: ViewRay> ViewRay for Option<T> {
    fn viewport_ray(&self, position: Vec2) -> Option<Ray3d> {
        self.as_ref()?.viewport_ray(position)
    }
}
