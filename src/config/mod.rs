use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::board::RoutePolicy;
use crate::constants::FIRST_PLAY_INDEX;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_play_index() -> u32 {
    FIRST_PLAY_INDEX
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Number embedded in the next exported play's filename
    #[serde(default = "default_play_index")]
    pub next_play_index: u32,

    /// Whether presses extend the player's route or start a new one
    #[serde(default)]
    pub route_policy: RoutePolicy,

    /// Where exported plays are written (platform exports dir when unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            next_play_index: FIRST_PLAY_INDEX,
            route_policy: RoutePolicy::default(),
            export_dir: None,
        }
    }
}

impl AppConfigData {
    /// The counter value to use for the next export. A stored zero counts as unset.
    pub fn play_index(&self) -> u32 {
        if self.next_play_index == 0 {
            FIRST_PLAY_INDEX
        } else {
            self.next_play_index
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(crate::paths::exports_dir)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change the route policy
#[derive(Message)]
pub struct SetRoutePolicyRequest {
    pub policy: RoutePolicy,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config JSON, falling back to defaults with a reason on failure
fn parse_config(json: &str) -> LoadConfigResult {
    match serde_json::from_str(json) {
        Ok(data) => LoadConfigResult {
            data,
            reset_reason: None,
        },
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
            }
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: AppConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.reset_reason.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&config.data)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    if let Some(parent) = config.config_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    std::fs::write(&config.config_path, json)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let config_path = get_config_path();
    let result = load_config(&config_path);
    config.data = result.data;
    config.config_path = config_path;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Write a dirty config. It stays dirty if the write fails so the next
/// request retries it.
fn flush_config(config: &mut AppConfig) -> Result<(), String> {
    if !config.dirty {
        return Ok(());
    }
    save_config(config)?;
    config.dirty = false;
    Ok(())
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if let Err(e) = flush_config(&mut config) {
            error!("{}", e);
        }
    }
}

/// System to update the route policy
fn set_route_policy_system(
    mut events: MessageReader<SetRoutePolicyRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.route_policy != event.policy {
            config.data.route_policy = event.policy;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
            info!("Route policy set to {}", event.policy.display_name());
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetRoutePolicyRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_route_policy_system.run_if(on_message::<SetRoutePolicyRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.next_play_index, 1);
        assert_eq!(data.route_policy, RoutePolicy::ContinuePerPlayer);
        assert!(data.export_dir.is_none());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            next_play_index: 42,
            route_policy: RoutePolicy::NewPerGesture,
            export_dir: Some(PathBuf::from("/path/to/plays")),
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.next_play_index, 42);
        assert_eq!(parsed.route_policy, RoutePolicy::NewPerGesture);
        assert_eq!(parsed.export_dir, data.export_dir);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let result = parse_config("{}");
        assert!(result.reset_reason.is_none());
        assert_eq!(result.data.play_index(), 1);
        assert_eq!(result.data.route_policy, RoutePolicy::ContinuePerPlayer);
    }

    #[test]
    fn test_zero_counter_reads_as_first_index() {
        let result = parse_config(r#"{ "next_play_index": 0 }"#);
        assert_eq!(result.data.play_index(), 1);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let result = parse_config("{ not json");
        assert!(result.reset_reason.is_some());
        assert_eq!(result.data.next_play_index, 1);
    }

    #[test]
    fn test_export_dir_override() {
        let data = AppConfigData {
            export_dir: Some(PathBuf::from("/tmp/plays")),
            ..Default::default()
        };
        assert_eq!(data.export_dir(), PathBuf::from("/tmp/plays"));
    }

    #[test]
    fn test_save_config_writes_json() {
        let dir = std::env::temp_dir().join(format!("playbook-config-{}", std::process::id()));
        let config = AppConfig {
            data: AppConfigData {
                next_play_index: 7,
                ..Default::default()
            },
            config_path: dir.join("config.json"),
            dirty: true,
        };

        save_config(&config).unwrap();
        let json = std::fs::read_to_string(&config.config_path).unwrap();
        let parsed = parse_config(&json);
        assert_eq!(parsed.data.next_play_index, 7);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_save_keeps_config_dirty() {
        // A plain file where the config directory should be makes the write fail
        let blocker =
            std::env::temp_dir().join(format!("playbook-config-blocker-{}", std::process::id()));
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut config = AppConfig {
            data: AppConfigData {
                next_play_index: 4,
                ..Default::default()
            },
            config_path: blocker.join("config.json"),
            dirty: true,
        };

        assert!(flush_config(&mut config).is_err());
        assert!(config.dirty);

        let dir = std::env::temp_dir().join(format!("playbook-config-retry-{}", std::process::id()));
        config.config_path = dir.join("config.json");
        flush_config(&mut config).unwrap();
        assert!(!config.dirty);
        assert!(config.config_path.exists());

        let _ = std::fs::remove_file(&blocker);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
