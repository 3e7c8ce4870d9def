//! Wire types for the user settings endpoint.
//!
//! The server stores a tab as two parallel arrays: the widget descriptors and
//! the grid layout records, both keyed by the widget identifier. Field names
//! follow the endpoint's JSON (`userWidgets`, `userLayout`, `wid`, `i`).

use serde::{Deserialize, Serialize};

/// One widget on the board, identified by `<kind>-<suffix>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetDescriptor {
    /// Widget identifier. The text before the first `-` names the kind.
    pub wid: String,
}

impl WidgetDescriptor {
    /// Creates a descriptor for the given identifier.
    pub fn new(wid: impl Into<String>) -> Self {
        Self { wid: wid.into() }
    }
}

/// Grid position and size of one widget, in grid cells.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GridRect {
    /// Column of the left edge.
    pub x: u32,
    /// Row of the top edge.
    pub y: u32,
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl GridRect {
    /// Creates a rect from position and size.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Unit-sized rect at the grid origin, where new widgets land.
    pub const ORIGIN: GridRect = GridRect::new(0, 0, 1, 1);
}

/// A layout record as exchanged with the grid component and the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutRecord {
    /// Identifier of the widget this record places.
    pub i: String,
    /// Position and size.
    #[serde(flatten)]
    pub rect: GridRect,
}

impl LayoutRecord {
    /// Creates a record placing `wid` at `rect`.
    pub fn new(wid: impl Into<String>, rect: GridRect) -> Self {
        Self {
            i: wid.into(),
            rect,
        }
    }
}

/// Body of `GET /api/user/settings`.
///
/// Missing arrays are read as empty so an account that never saved a board
/// parses cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Widget descriptors in display order.
    #[serde(default)]
    pub user_widgets: Vec<WidgetDescriptor>,
    /// Layout records, one per widget.
    #[serde(default)]
    pub user_layout: Vec<LayoutRecord>,
}

impl UserSettings {
    /// Returns `true` when both arrays hold at least one entry.
    pub fn has_board(&self) -> bool {
        !self.user_widgets.is_empty() && !self.user_layout.is_empty()
    }
}

/// Body of `PUT /api/user/settings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveTabRequest {
    /// Tab index the arrays belong to.
    pub tab: u32,
    /// Widget descriptors in display order.
    pub user_widgets: Vec<WidgetDescriptor>,
    /// Layout records, one per widget.
    pub user_layout: Vec<LayoutRecord>,
}
