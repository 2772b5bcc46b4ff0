//! Pickable geometry and the ray intersection math behind it.
//!
//! All tests run in the node's local space. The local ray keeps the
//! world ray's parameterisation (affine maps preserve it), so a local hit
//! parameter is also the world-space distance along the unit view ray.

use bevy::prelude::*;

use crate::constants::MIN_POLYLINE_PICK_TOLERANCE;

/// Pickable geometry attached to a scene node, in the node's local space.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum PickShape {
    /// Sphere centred on the node origin
    Sphere { radius: f32 },
    /// Axis-aligned rectangle on the local XY plane
    Rect { half_size: Vec2 },
    /// Connected segments on the local XY plane
    Polyline { points: Vec<Vec2>, width: f32 },
}

impl PickShape {
    /// Intersect a local-space ray. Returns the ray parameter of the nearest
    /// hit in front of the origin.
    pub fn intersect_local(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match self {
            PickShape::Sphere { radius } => ray_sphere(origin, direction, *radius),
            PickShape::Rect { half_size } => {
                let (t, point) = ray_xy_plane(origin, direction)?;
                point_in_rect(point, *half_size).then_some(t)
            }
            PickShape::Polyline { points, width } => {
                let (t, point) = ray_xy_plane(origin, direction)?;
                let threshold = width.max(MIN_POLYLINE_PICK_TOLERANCE);
                point_near_polyline(point, points, threshold).then_some(t)
            }
        }
    }
}

/// Nearest non-negative ray parameter hitting a sphere at the origin
pub fn ray_sphere(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let a = direction.length_squared();
    if a < f32::EPSILON {
        return None;
    }
    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / a;
    let far = (-b + root) / a;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        // Ray starts inside the sphere
        Some(far)
    } else {
        None
    }
}

/// Intersect a ray with the local z = 0 plane
pub fn ray_xy_plane(origin: Vec3, direction: Vec3) -> Option<(f32, Vec2)> {
    if direction.z.abs() < f32::EPSILON {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    Some((t, (origin + direction * t).truncate()))
}

/// Check if a point lies inside a rectangle centred on the origin
pub fn point_in_rect(point: Vec2, half_size: Vec2) -> bool {
    point.x.abs() <= half_size.x && point.y.abs() <= half_size.y
}

/// Check if a point is within a given distance of a line segment
fn point_near_segment(point: Vec2, seg_start: Vec2, seg_end: Vec2, threshold: f32) -> bool {
    let line_vec = seg_end - seg_start;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return point.distance(seg_start) <= threshold;
    }

    // Project point onto line, clamped to segment
    let t = ((point - seg_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = seg_start + line_vec * t;

    point.distance(projection) <= threshold
}

/// Check if a point is near any segment of a polyline
pub fn point_near_polyline(point: Vec2, points: &[Vec2], threshold: f32) -> bool {
    match points {
        [] => false,
        [single] => point.distance(*single) <= threshold,
        _ => points
            .windows(2)
            .any(|pair| point_near_segment(point, pair[0], pair[1], threshold)),
    }
}
