//! # board-api
//!
//! Typed client for the settings endpoint that stores a user's widget board.
//!
//! The endpoint keeps one tab as two parallel arrays: widget descriptors and
//! grid layout records, keyed by widget identifier.
//!
//! ## Example
//!
//! ```rust,ignore
//! use board_api::SettingsClient;
//! use std::time::Duration;
//!
//! let client = SettingsClient::new("https://board.example.com", Duration::from_secs(10))?;
//! let settings = client.fetch_settings(&token).await?;
//! println!("{} widgets saved", settings.user_widgets.len());
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{SettingsClient, SETTINGS_PATH};
pub use error::ApiError;
pub use types::{GridRect, LayoutRecord, SaveTabRequest, UserSettings, WidgetDescriptor};
