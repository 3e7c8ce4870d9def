//! Widget Board library
//!
//! This crate manages a grid dashboard of widgets: which widgets a user has,
//! where each one sits on the grid, and how that state is kept in sync
//! between a local store and a remote settings endpoint.
//!
//! # Layers
//!
//! - [`board`] - in-memory widget/layout state for one tab
//! - [`sync`] - local store plus remote endpoint persistence
//! - [`dashboard`] - a mounted board that persists every change
//! - [`layout`] - grid geometry (cells to pixels)
//! - [`widgets`] - widget kinds, identifiers and per-widget settings
//!
//! The HTTP client for the remote endpoint lives in the `board-api` crate.

/// Widget/layout state manager.
pub mod board;

/// TOML configuration: schema, loading and default template.
pub mod config;

/// Board plus persistence, as the CLI drives it.
pub mod dashboard;

/// Grid geometry.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Yes/no confirmation.
pub mod prompt;

/// File-backed local key-value store.
pub mod store;

/// Local/remote synchronisation.
pub mod sync;

/// Widget kinds and settings.
pub mod widgets;

pub use board::{Board, DeleteOutcome, Placement};
pub use board_api::{GridRect, LayoutRecord, WidgetDescriptor};
pub use config::schema::Config;
pub use dashboard::Dashboard;
pub use layout::{GridSpec, PixelRect};
pub use store::{LocalStore, StoreError};
pub use sync::{RemoteSettings, Synchronizer};
pub use widgets::{WidgetKind, WidgetSettings};
