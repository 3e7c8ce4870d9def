//! Logging initialization for the `wb` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the `WB_LOG`
//! environment variable. Falls back to the `log.level` config value when the
//! variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Config level (warn by default)
//! wb show
//!
//! # Debug level
//! WB_LOG=debug wb show
//!
//! # Module-specific filtering
//! WB_LOG=widget_board::sync=debug,warn wb show
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "WB_LOG";

/// Filter from `WB_LOG`, or `level` when the variable is unset or invalid.
pub fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// Output goes to stderr so stdout stays clean for command output. Calling
/// this more than once is harmless; later calls leave the first subscriber
/// in place.
pub fn init(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
