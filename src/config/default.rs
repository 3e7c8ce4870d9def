//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# widget-board configuration
#
# This file was auto-generated with default values.
# Uncomment and modify options to customize your board.
#
# Location: $XDG_CONFIG_HOME/widget-board/config.toml

# ==============================================================================
# Remote settings endpoint
# ==============================================================================

[remote]

# Mirror the board to the remote settings endpoint.
# The remote is only contacted when a token is stored (see `wb login`).
enabled = true

# Base URL of the dashboard server. `/api/user/settings` is appended.
base_url = "http://localhost:3000"

# Per-request timeout as a human-readable duration.
# Examples: "10s", "1500ms", "1m"
timeout = "10s"

# ==============================================================================
# Board
# ==============================================================================

[board]

# Tab index. Local storage keys are suffixed with it (userWidgets0, userLayout0).
tab = 0

# ==============================================================================
# Grid geometry
# ==============================================================================

[grid]

# Number of columns widgets snap to.
cols = 4

# Height of one grid row in pixels.
row_height = 200

# Total width of the grid in pixels.
width = 1600

# Horizontal and vertical gap between cells in pixels.
margin = [20, 20]

# ==============================================================================
# Local store
# ==============================================================================

[store]

# Path of the local store file. Empty means the platform data directory
# ($XDG_DATA_HOME/widget-board/store.json). Tilde (~) is expanded.
path = ""

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Verbosity when WB_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
level = "warn"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
