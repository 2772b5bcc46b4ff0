//! Colors used by the annotation viewer.

use bevy::prelude::Color;

/// Window clear color
pub const BACKGROUND: Color = Color::srgb(0.11, 0.12, 0.14);

/// Annotation fill when idle
pub const ANNOTATION_IDLE: Color = Color::srgb(0.35, 0.45, 0.6);

/// Annotation fill while hovered
pub const ANNOTATION_HOVERED: Color = Color::srgb(1.0, 0.7, 0.2);

/// Brief flash after a click
pub const ANNOTATION_CLICKED: Color = Color::srgb(0.2, 0.85, 0.4);

/// Route polyline stroke
pub const ROUTE_COLOR: Color = Color::srgb(0.9, 0.3, 0.3);
