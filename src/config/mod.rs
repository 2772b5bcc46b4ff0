use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::DEFAULT_HOVER_ENABLED;
use crate::events::{AnnotationEventDispatcher, LoggingHandler, SharedHandler};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_hover_enabled() -> bool {
    DEFAULT_HOVER_ENABLED
}

/// Settings persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfigData {
    /// Whether idle ticks evaluate hover enter/leave
    #[serde(default = "default_hover_enabled")]
    pub hover_enabled: bool,

    /// Register a debug-level logging listener at startup
    #[serde(default)]
    pub log_events: bool,
}

impl Default for AnnotationConfigData {
    fn default() -> Self {
        Self {
            hover_enabled: DEFAULT_HOVER_ENABLED,
            log_events: false,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AnnotationConfig {
    /// The persisted configuration data
    pub data: AnnotationConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            data: AnnotationConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify the host when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether a reset happened this session
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to turn hover tracking on or off
#[derive(Message)]
pub struct SetHoverEnabledRequest {
    pub enabled: bool,
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub data: AnnotationConfigData,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `path`, falling back to defaults
pub fn load_config(path: &Path) -> LoadConfigResult {
    if !path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: AnnotationConfigData::default(),
            reset_reason: None,
        };
    }

    let (data, reset_reason) = match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", path);
                (data, None)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                (
                    AnnotationConfigData::default(),
                    Some(format!("Configuration file was corrupted: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AnnotationConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
pub fn save_config(config: &AnnotationConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&config.data)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(&config.config_path, json)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AnnotationConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to push loaded settings into the dispatcher
fn apply_config_system(
    config: Res<AnnotationConfig>,
    mut dispatcher: ResMut<AnnotationEventDispatcher>,
) {
    apply_config(&config.data, &mut dispatcher);
}

/// Apply settings to a dispatcher
pub fn apply_config(data: &AnnotationConfigData, dispatcher: &mut AnnotationEventDispatcher) {
    dispatcher.set_hover_enabled(data.hover_enabled);
    if data.log_events {
        let handler: SharedHandler = Arc::new(LoggingHandler);
        dispatcher.add_handler(handler);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AnnotationConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            if let Err(e) = save_config(&config) {
                error!("{}", e);
            }
            config.dirty = false;
        }
    }
}

/// System to toggle hover tracking; takes effect on the next tick
fn set_hover_enabled_system(
    mut events: MessageReader<SetHoverEnabledRequest>,
    mut config: ResMut<AnnotationConfig>,
    mut dispatcher: ResMut<AnnotationEventDispatcher>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        dispatcher.set_hover_enabled(event.enabled);
        if config.data.hover_enabled != event.enabled {
            config.data.hover_enabled = event.enabled;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
        info!("Hover tracking {}", if event.enabled { "enabled" } else { "disabled" });
    }
}

/// Loads, applies and persists settings. Requires `AnnotationEventsPlugin`.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnnotationConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetHoverEnabledRequest>()
            .add_systems(
                Startup,
                (load_config_system, apply_config_system)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    set_hover_enabled_system.run_if(on_message::<SetHoverEnabledRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "annotation_events_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_config_data_default() {
        let data = AnnotationConfigData::default();
        assert!(data.hover_enabled);
        assert!(!data.log_events);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: AnnotationConfigData = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AnnotationConfigData::default());

        let parsed: AnnotationConfigData =
            serde_json::from_str(r#"{"hover_enabled": false}"#).unwrap();
        assert!(!parsed.hover_enabled);
        assert!(!parsed.log_events);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let result = load_config(&temp_config_path("missing"));
        assert_eq!(result.data, AnnotationConfigData::default());
        assert!(result.reset_reason.is_none());
    }

    #[test]
    fn test_load_corrupt_file_reports_reset() {
        let path = temp_config_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();

        let result = load_config(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(result.data, AnnotationConfigData::default());
        assert!(result.reset_reason.unwrap().contains("corrupted"));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path("saved");
        let config = AnnotationConfig {
            data: AnnotationConfigData {
                hover_enabled: false,
                log_events: true,
            },
            config_path: path.clone(),
            dirty: true,
        };

        save_config(&config).unwrap();
        let result = load_config(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(result.data, config.data);
        assert!(result.reset_reason.is_none());
    }

    #[test]
    fn test_apply_config_sets_hover_and_logging() {
        let mut dispatcher = AnnotationEventDispatcher::new();
        let data = AnnotationConfigData {
            hover_enabled: false,
            log_events: true,
        };

        apply_config(&data, &mut dispatcher);

        assert!(!dispatcher.hover_enabled());
        assert_eq!(dispatcher.handler_count(), 1);
    }

    #[test]
    fn test_apply_config_without_logging_adds_no_handler() {
        let mut dispatcher = AnnotationEventDispatcher::new();
        apply_config(&AnnotationConfigData::default(), &mut dispatcher);

        assert!(dispatcher.hover_enabled());
        assert_eq!(dispatcher.handler_count(), 0);
    }

    fn hover_request_world(name: &str) -> World {
        let mut world = World::new();
        world.insert_resource(AnnotationConfig {
            data: AnnotationConfigData::default(),
            config_path: temp_config_path(name),
            dirty: false,
        });
        world.insert_resource(AnnotationEventDispatcher::new());
        world.init_resource::<Messages<SetHoverEnabledRequest>>();
        world.init_resource::<Messages<SaveConfigRequest>>();
        world
    }

    fn send_hover_request(world: &mut World, enabled: bool) {
        world
            .resource_mut::<Messages<SetHoverEnabledRequest>>()
            .clear();
        world.write_message(SetHoverEnabledRequest { enabled });
        world.run_system_once(set_hover_enabled_system).unwrap();
    }

    #[test]
    fn test_hover_request_updates_dispatcher_and_config() {
        let mut world = hover_request_world("hover_request");

        send_hover_request(&mut world, false);

        assert!(!world.resource::<AnnotationEventDispatcher>().hover_enabled());
        let config = world.resource::<AnnotationConfig>();
        assert!(!config.data.hover_enabled);
        assert!(config.dirty);
        assert_eq!(world.resource::<Messages<SaveConfigRequest>>().len(), 1);

        // Same value again: nothing new to persist
        send_hover_request(&mut world, false);

        assert!(!world.resource::<AnnotationEventDispatcher>().hover_enabled());
        assert_eq!(world.resource::<Messages<SaveConfigRequest>>().len(), 1);
    }

    #[test]
    fn test_hover_request_matching_config_skips_save() {
        let mut world = hover_request_world("hover_unchanged");
        world
            .resource_mut::<AnnotationEventDispatcher>()
            .set_hover_enabled(false);

        // Config already says enabled; only the dispatcher catches up
        send_hover_request(&mut world, true);

        assert!(world.resource::<AnnotationEventDispatcher>().hover_enabled());
        assert!(!world.resource::<AnnotationConfig>().dirty);
        assert!(world.resource::<Messages<SaveConfigRequest>>().is_empty());
    }
}
