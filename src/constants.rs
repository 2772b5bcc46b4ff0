//! Centralized constants used across the crate.

/// Default viewer window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default viewer window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;

/// Minimum distance (local units) at which a polyline still counts as hit,
/// so hairline strokes stay pickable
pub const MIN_POLYLINE_PICK_TOLERANCE: f32 = 4.0;

/// Hover tracking state for a fresh dispatcher or a missing config field
pub const DEFAULT_HOVER_ENABLED: bool = true;

/// File name of the persisted settings
pub const CONFIG_FILE_NAME: &str = "annotation_events.json";

/// Directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "annotation-events";
