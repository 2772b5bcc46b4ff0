//! Pick adapter: maps a screen position to the annotations under it.
//!
//! - [`hit`] - Hit records and the [`Picker`]/[`ViewRay`] traits
//! - [`shapes`] - Pickable geometry ([`PickShape`]) and ray intersection
//! - [`scene`] - ECS-backed picker ([`AnnotationScene`]) and markers

mod hit;
mod scene;
mod shapes;

pub use hit::{Hit, Picker, ViewRay};
pub use scene::{Annotation, AnnotationCamera, AnnotationScene, CameraView};
pub use shapes::{point_in_rect, point_near_polyline, ray_sphere, ray_xy_plane, PickShape};
