//! Platform-aware path resolution for widget-board.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/widget-board` or `~/.config/widget-board`
//! - Data (local store): `$XDG_DATA_HOME/widget-board` or `~/.local/share/widget-board`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/widget-board` or `~/Library/Application Support/widget-board`
//! - Data: `$XDG_DATA_HOME/widget-board` or `~/Library/Application Support/widget-board`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "widget-board";

/// Home directory, or the current directory when none can be determined.
fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the configuration directory for widget-board.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/widget-board` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/widget-board`
///    - macOS: `~/Library/Application Support/widget-board`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::config_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the data directory holding the local store.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/widget-board` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/share/widget-board`
///    - macOS: `~/Library/Application Support/widget-board`
pub fn data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_data_dir().join(APP_NAME)
}

fn platform_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().unwrap_or_else(|| home_dir().join("Library/Application Support"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        home_dir().join(".local/share")
    }
}

/// Returns the path of the local key-value store file.
///
/// Resolves to `data_dir()/store.json`.
pub fn store_path() -> PathBuf {
    data_dir().join("store.json")
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, it is returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
