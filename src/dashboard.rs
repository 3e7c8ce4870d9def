//! The board as a running dashboard sees it.
//!
//! [`Dashboard`] ties the in-memory [`Board`] to its [`Synchronizer`]: every
//! state change is persisted locally before the call returns, and the remote
//! save it starts is tracked until [`Dashboard::flush`].

use board_api::LayoutRecord;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::board::{Board, DeleteOutcome};
use crate::prompt::Confirm;
use crate::store::{LocalStore, StoreError};
use crate::sync::{RemoteSettings, Synchronizer};
use crate::widgets::{settings, WidgetKind, WidgetSettings};

/// A mounted board plus its persistence.
pub struct Dashboard<R> {
    board: Board,
    sync: Synchronizer<R>,
    pending: Vec<JoinHandle<()>>,
}

impl<R: RemoteSettings> Dashboard<R> {
    /// Mount the board: local state first, remote when a token is stored.
    pub async fn mount(mut sync: Synchronizer<R>) -> Result<Self, StoreError> {
        let board = sync.mount().await?;
        Ok(Self {
            board,
            sync,
            pending: Vec::new(),
        })
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tab being shown.
    pub fn tab(&self) -> u32 {
        self.sync.tab()
    }

    /// Add a widget of the selected kind and persist.
    ///
    /// `None` (cancelled selection) changes and persists nothing.
    pub fn add_widget(&mut self, selection: Option<WidgetKind>) -> Result<Option<String>, StoreError> {
        let Some(wid) = self.board.add_widget(selection) else {
            debug!("add cancelled");
            return Ok(None);
        };
        self.persist()?;
        Ok(Some(wid))
    }

    /// Delete `wid` after confirmation, persist, and forget its settings.
    ///
    /// A missing identifier or a declined prompt persists nothing.
    pub fn delete_widget<C: Confirm + ?Sized>(&mut self, wid: &str, confirm: &C) -> Result<DeleteOutcome, StoreError> {
        let outcome = self.board.delete_widget(wid, confirm);
        if let DeleteOutcome::Removed(_) = outcome {
            self.persist()?;
            settings::forget_in_store(self.sync.store_mut(), wid)?;
        }
        Ok(outcome)
    }

    /// Take a replacement layout from the grid and persist it.
    ///
    /// Returns the number of records that matched a widget.
    pub fn on_layout_change(&mut self, layout: &[LayoutRecord]) -> Result<usize, StoreError> {
        let applied = self.board.apply_layout(layout);
        self.persist()?;
        Ok(applied)
    }

    /// Per-widget settings as currently stored.
    pub fn settings(&self) -> WidgetSettings {
        WidgetSettings::load(self.sync.store())
    }

    /// The local store.
    pub fn store(&self) -> &LocalStore {
        self.sync.store()
    }

    /// The local store, mutably.
    pub fn store_mut(&mut self) -> &mut LocalStore {
        self.sync.store_mut()
    }

    /// Number of remote saves started and not yet awaited.
    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every remote save started so far.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "remote save task did not finish");
            }
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.pending.retain(|h| !h.is_finished());
        if let Some(handle) = self.sync.persist(&self.board)? {
            self.pending.push(handle);
        }
        Ok(())
    }
}
