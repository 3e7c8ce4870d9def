//! TOML configuration schema types for widget-board.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of the file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"10s"`, `"1500ms"`)
//! parsed by the `humantime` crate in the accessor methods.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [remote]
/// [board]
/// [grid]
/// [store]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Remote settings endpoint.
    pub remote: RemoteConfig,
    /// Which board to operate on.
    pub board: BoardConfig,
    /// Grid geometry used to place widgets.
    pub grid: GridConfig,
    /// Local store location.
    pub store: StoreConfig,
    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Check values that parse as TOML but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.remote.timeout()?;
        if self.remote.enabled && self.remote.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remote.base_url",
                message: "must not be empty while the remote is enabled".to_string(),
            });
        }
        if self.grid.cols == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.cols",
                message: "must be at least 1".to_string(),
            });
        }
        if self.grid.row_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "grid.row_height",
                message: "must be at least 1".to_string(),
            });
        }
        let gutters = u64::from(self.grid.margin[0]) * (u64::from(self.grid.cols) + 1);
        if u64::from(self.grid.width) <= gutters {
            return Err(ConfigError::InvalidValue {
                field: "grid.width",
                message: format!("{} leaves no room for columns after {gutters}px of margins", self.grid.width),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

/// Remote settings endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Whether to talk to the remote at all. When `false`, only the local
    /// store is used even if a token is present.
    pub enabled: bool,
    /// Base URL; `/api/user/settings` is appended.
    pub base_url: String,
    /// Per-request timeout as a human-readable duration.
    pub timeout: String,
}

impl RemoteConfig {
    /// Parsed request timeout.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.timeout).map_err(|e| ConfigError::InvalidValue {
            field: "remote.timeout",
            message: format!("'{}': {e}", self.timeout),
        })
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:3000".to_string(),
            timeout: "10s".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Board selection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    /// Tab index; storage keys are suffixed with it.
    pub tab: u32,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Grid geometry, in pixels and columns.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns.
    pub cols: u32,
    /// Height of one row in pixels.
    pub row_height: u32,
    /// Total grid width in pixels.
    pub width: u32,
    /// Horizontal and vertical gap between cells in pixels.
    pub margin: [u32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 4,
            row_height: 200,
            width: 1600,
            margin: [20, 20],
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Local store configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the store file. Empty means the platform data directory.
    /// Tilde (~) is expanded.
    pub path: String,
}

impl StoreConfig {
    /// Path the store should be opened at.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.is_empty() {
            xdg::store_path()
        } else {
            xdg::expand_tilde(&self.path)
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when `WB_LOG` is not set.
    pub level: LogLevel,
}

/// Log level variants.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// General operational information.
    Info,
    /// Detailed debugging information.
    Debug,
    /// Very verbose output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
