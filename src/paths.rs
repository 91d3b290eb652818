//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Playbook\`
//! - macOS: `~/Library/Application Support/Playbook/`
//! - Linux: `~/.config/playbook/` (config), `~/.local/share/playbook/` (data)

use std::path::{Path, PathBuf};

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/playbook/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("playbook"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join("playbook"))
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Default directory for exported play images.
///
/// - Dev mode: `./plays/`
/// - Installed: the user's pictures directory under `Playbook/`, else `{data_dir}/plays/`
pub fn exports_dir() -> PathBuf {
    if is_dev_mode() {
        return PathBuf::from("plays");
    }

    dirs::picture_dir()
        .map(|p| p.join("Playbook"))
        .or_else(|| data_dir().map(|p| p.join("plays")))
        .unwrap_or_else(|| PathBuf::from("plays"))
}

/// Ensure all required directories exist.
///
/// Called early in startup to create config, data, log and export directories.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        // In dev mode, directories are local and typically exist
        return Ok(());
    }

    create_app_directories(config_dir(), data_dir(), &exports_dir())
}

fn create_app_directories(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    exports: &Path,
) -> std::io::Result<()> {
    if let Some(config) = config {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data {
        std::fs::create_dir_all(&data)?;
        std::fs::create_dir_all(data.join("logs"))?;
    }
    std::fs::create_dir_all(exports)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_has_json_extension() {
        let path = config_file();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_dev_mode_returns_local_paths() {
        // In tests, is_dev_mode() should be true due to debug_assertions
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(data_dir(), Some(PathBuf::from(".")));
        assert_eq!(exports_dir(), PathBuf::from("plays"));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_create_app_directories_includes_exports() {
        let root = std::env::temp_dir().join(format!("playbook-dirs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let exports = root.join("Pictures").join("Playbook");

        create_app_directories(Some(root.join("config")), Some(root.join("data")), &exports)
            .unwrap();

        assert!(root.join("config").is_dir());
        assert!(root.join("data").join("logs").is_dir());
        assert!(exports.is_dir());

        let _ = std::fs::remove_dir_all(&root);
    }
}
