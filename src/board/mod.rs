//! Widget/layout state for one board tab.
//!
//! The persisted format keeps widgets and layout records as two parallel
//! arrays joined by widget identifier. In memory the board holds one
//! [`Placement`] per identifier instead, so a widget can never exist without
//! its layout record (or the reverse). [`Board::from_parts`] and
//! [`Board::to_parts`] convert between the two shapes.
//!
//! Board operations never fail. Persisting the result is the caller's job
//! (see [`crate::dashboard::Dashboard`]).

use board_api::{GridRect, LayoutRecord, WidgetDescriptor};
use rand::Rng;
use std::collections::{HashMap, HashSet};

use crate::prompt::{Confirm, DELETE_QUESTION};
use crate::widgets::{generate_wid, WidgetKind};

#[cfg(test)]
mod tests;

/// One widget together with its grid rect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The widget descriptor.
    pub widget: WidgetDescriptor,
    /// Where the widget sits on the grid.
    pub rect: GridRect,
}

impl Placement {
    /// Creates a placement for `wid` at `rect`.
    pub fn new(wid: impl Into<String>, rect: GridRect) -> Self {
        Self {
            widget: WidgetDescriptor::new(wid),
            rect,
        }
    }

    /// Widget identifier.
    pub fn wid(&self) -> &str {
        &self.widget.wid
    }

    /// Kind encoded in the identifier, if known.
    pub fn kind(&self) -> Option<WidgetKind> {
        WidgetKind::from_wid(self.wid())
    }

    /// Layout record in wire form.
    pub fn layout_record(&self) -> LayoutRecord {
        LayoutRecord::new(self.wid(), self.rect)
    }
}

/// Result of [`Board::delete_widget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The widget was removed.
    Removed(Placement),
    /// No widget has that identifier; nothing was asked or changed.
    Missing,
    /// The user declined; nothing changed.
    Declined,
}

/// Ordered widgets of one tab, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    placements: Vec<Placement>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The board a user starts with before anything is saved.
    pub fn defaults() -> Self {
        Self {
            placements: vec![
                Placement::new("weather-default", GridRect::new(0, 0, 1, 1)),
                Placement::new("stock-default", GridRect::new(1, 0, 1, 1)),
                Placement::new("note-default", GridRect::new(2, 0, 1, 1)),
            ],
        }
    }

    /// Pair the two persisted arrays by identifier.
    ///
    /// Order follows `widgets`. Widgets without a layout record, layout
    /// records without a widget, and repeated identifiers are dropped with a
    /// warning; the first occurrence of an identifier wins.
    pub fn from_parts(widgets: Vec<WidgetDescriptor>, layout: Vec<LayoutRecord>) -> Self {
        let mut rects: HashMap<String, GridRect> = HashMap::with_capacity(layout.len());
        for record in layout {
            if rects.contains_key(&record.i) {
                tracing::warn!("Dropping duplicate layout record for '{}'", record.i);
                continue;
            }
            rects.insert(record.i, record.rect);
        }

        let mut placements = Vec::with_capacity(widgets.len());
        let mut seen = HashSet::with_capacity(widgets.len());
        for widget in widgets {
            if !seen.insert(widget.wid.clone()) {
                tracing::warn!("Dropping duplicate widget '{}'", widget.wid);
                continue;
            }
            match rects.remove(&widget.wid) {
                Some(rect) => placements.push(Placement { widget, rect }),
                None => tracing::warn!("Dropping widget '{}' with no layout record", widget.wid),
            }
        }

        for orphan in rects.keys() {
            tracing::warn!("Dropping layout record '{}' with no widget", orphan);
        }

        Self { placements }
    }

    /// Split into the persisted arrays, both in board order.
    pub fn to_parts(&self) -> (Vec<WidgetDescriptor>, Vec<LayoutRecord>) {
        self.placements
            .iter()
            .map(|p| (p.widget.clone(), p.layout_record()))
            .unzip()
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if the board holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter()
    }

    /// Identifiers in board order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.placements.iter().map(Placement::wid)
    }

    /// Placement for `wid`.
    pub fn get(&self, wid: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.wid() == wid)
    }

    /// Returns `true` if a widget with `wid` is on the board.
    pub fn contains(&self, wid: &str) -> bool {
        self.get(wid).is_some()
    }

    /// Add a widget of the selected kind at the grid origin.
    ///
    /// `None` means the selection was cancelled; the board is unchanged and
    /// `None` is returned. Otherwise returns the new identifier.
    pub fn add_widget(&mut self, selection: Option<WidgetKind>) -> Option<String> {
        self.add_widget_with(selection, &mut rand::thread_rng())
    }

    /// [`add_widget`](Self::add_widget) with an explicit random source.
    pub fn add_widget_with<R: Rng + ?Sized>(
        &mut self,
        selection: Option<WidgetKind>,
        rng: &mut R,
    ) -> Option<String> {
        let kind = selection?;
        let wid = loop {
            let candidate = generate_wid(kind, rng);
            if !self.contains(&candidate) {
                break candidate;
            }
            tracing::debug!("Regenerating colliding widget id '{}'", candidate);
        };
        self.placements.push(Placement::new(wid.clone(), GridRect::ORIGIN));
        tracing::debug!("Added widget '{}'", wid);
        Some(wid)
    }

    /// Remove the widget `wid` once `confirm` agrees.
    ///
    /// An unknown identifier returns [`DeleteOutcome::Missing`] without
    /// asking.
    pub fn delete_widget<C: Confirm + ?Sized>(&mut self, wid: &str, confirm: &C) -> DeleteOutcome {
        let Some(index) = self.placements.iter().position(|p| p.wid() == wid) else {
            return DeleteOutcome::Missing;
        };
        if !confirm.confirm(DELETE_QUESTION) {
            return DeleteOutcome::Declined;
        }
        let removed = self.placements.remove(index);
        tracing::debug!("Deleted widget '{}'", wid);
        DeleteOutcome::Removed(removed)
    }

    /// Take a full replacement layout from the grid.
    ///
    /// Each record moves the matching placement. Records for unknown
    /// identifiers are ignored and placements without a record keep their
    /// rect. Returns the number of records applied.
    pub fn apply_layout(&mut self, layout: &[LayoutRecord]) -> usize {
        let mut applied = 0;
        for record in layout {
            match self.placements.iter_mut().find(|p| p.widget.wid == record.i) {
                Some(placement) => {
                    placement.rect = record.rect;
                    applied += 1;
                }
                None => tracing::debug!("Ignoring layout record for unknown widget '{}'", record.i),
            }
        }
        applied
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}
