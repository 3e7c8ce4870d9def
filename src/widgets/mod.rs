//! Widget kinds and identifiers.
//!
//! A widget is identified by a string of the form `<kind>-<suffix>`. The kind
//! prefix selects how a front end renders the widget; the random suffix keeps
//! identifiers unique within a tab. Everything else about a widget (city,
//! stock symbol, note text) lives in [`settings::WidgetSettings`], keyed by
//! the same identifier.

pub mod settings;

pub use settings::WidgetSettings;

use rand::Rng;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Every widget type a board can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Current weather for a city.
    Weather,
    /// Air quality index.
    AirQuality,
    /// Arbitrary embedded page.
    Embed,
    /// Lo-fi music player.
    Lofi,
    /// Free-form note.
    Note,
    /// Stock price chart.
    Stock,
    /// Single-line stock ticker.
    StockMini,
    /// Toggl time-tracking timer.
    Toggl,
    /// Forces the following widgets onto a new row.
    Break,
}

impl WidgetKind {
    /// All kinds, in the order the add dialog lists them.
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::Weather,
        WidgetKind::AirQuality,
        WidgetKind::Embed,
        WidgetKind::Lofi,
        WidgetKind::Note,
        WidgetKind::Stock,
        WidgetKind::StockMini,
        WidgetKind::Toggl,
        WidgetKind::Break,
    ];

    /// Identifier prefix for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather",
            WidgetKind::AirQuality => "airq",
            WidgetKind::Embed => "embed",
            WidgetKind::Lofi => "lofi",
            WidgetKind::Note => "note",
            WidgetKind::Stock => "stock",
            WidgetKind::StockMini => "stockmini",
            WidgetKind::Toggl => "toggl",
            WidgetKind::Break => "BREAK",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::Weather => "Current weather for a city",
            WidgetKind::AirQuality => "Air quality index",
            WidgetKind::Embed => "Embedded web page",
            WidgetKind::Lofi => "Lo-fi music player",
            WidgetKind::Note => "Free-form note",
            WidgetKind::Stock => "Stock price chart",
            WidgetKind::StockMini => "Compact stock ticker",
            WidgetKind::Toggl => "Toggl timer",
            WidgetKind::Break => "Row break",
        }
    }

    /// Settings a freshly added widget of this kind starts with.
    pub fn default_settings(self) -> Value {
        match self {
            WidgetKind::Weather => json!({ "city": "New York" }),
            WidgetKind::Stock | WidgetKind::StockMini => json!({ "symbol": "SPY" }),
            _ => json!({}),
        }
    }

    /// Kind encoded in a widget identifier, if the prefix is a known kind.
    pub fn from_wid(wid: &str) -> Option<WidgetKind> {
        let prefix = wid.split('-').next().unwrap_or_default();
        prefix.parse().ok()
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a [`WidgetKind`] from its prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget kind '{0}' (expected one of: {})", kind_list())]
pub struct ParseKindError(pub String);

fn kind_list() -> String {
    WidgetKind::ALL
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for WidgetKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Generate a new identifier `<kind>-<suffix>` with an 8-hex-digit suffix.
pub fn generate_wid<R: Rng + ?Sized>(kind: WidgetKind, rng: &mut R) -> String {
    format!("{}-{:08x}", kind.as_str(), rng.gen::<u32>())
}
