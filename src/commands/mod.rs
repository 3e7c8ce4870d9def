//! Command implementations for the `wb` CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `board` - Board commands (show, add, delete, layout, move, kinds)
//! - `settings` - Token and per-widget settings commands
//! - `config` - Configuration file commands

pub(crate) mod board;
pub(crate) mod config;
pub(crate) mod settings;

pub(crate) use board::*;
pub(crate) use config::*;
pub(crate) use settings::*;

use std::path::PathBuf;
use std::process::ExitCode;

use board_api::{ApiError, SettingsClient};
use thiserror::Error;
use widget_board::config::error::ConfigError;
use widget_board::{Config, Dashboard, LocalStore, StoreError, Synchronizer};

/// Errors surfaced by command handlers.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Remote settings: {0}")]
    Api(#[from] ApiError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to read {what}: {source}")]
    Input {
        what: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout: {0}")]
    Layout(String),

    #[error("Failed to format output: {0}")]
    Output(String),

    #[error("No widget with id '{0}'")]
    UnknownWidget(String),

    #[error("Token must not be empty")]
    EmptyToken,
}

/// Settings shared by every command that touches the board.
pub(crate) struct Context {
    pub(crate) config: Config,
    pub(crate) store_path: PathBuf,
    pub(crate) offline: bool,
}

impl Context {
    /// `store` (from `--store`) wins over the config file's store path.
    pub(crate) fn new(config: Config, store: Option<PathBuf>, offline: bool) -> Self {
        let store_path = store.unwrap_or_else(|| config.store.resolved_path());
        Self {
            config,
            store_path,
            offline,
        }
    }

    pub(crate) fn open_store(&self) -> Result<LocalStore, StoreError> {
        LocalStore::open(&self.store_path)
    }

    /// HTTP client for the remote endpoint, or `None` when offline or disabled.
    pub(crate) fn remote(&self) -> Result<Option<SettingsClient>, CommandError> {
        if self.offline || !self.config.remote.enabled {
            tracing::debug!("remote disabled, using local store only");
            return Ok(None);
        }
        let timeout = self.config.remote.timeout()?;
        Ok(Some(SettingsClient::new(&self.config.remote.base_url, timeout)?))
    }

    /// Open the store and mount the configured tab.
    pub(crate) async fn mount(&self) -> Result<Dashboard<SettingsClient>, CommandError> {
        let sync = Synchronizer::new(self.open_store()?, self.remote()?, self.config.board.tab);
        Ok(Dashboard::mount(sync).await?)
    }
}

/// Run `body` on a fresh current-thread runtime.
pub(crate) fn block_on<F, T>(body: F) -> Result<T, CommandError>
where
    F: std::future::Future<Output = Result<T, CommandError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CommandError::Runtime)?;
    runtime.block_on(body)
}

/// Print `result`'s error, if any, and convert to an exit code.
pub(crate) fn finish(result: Result<(), CommandError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
