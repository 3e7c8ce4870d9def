//! Keeps the local store and the remote settings endpoint in step.
//!
//! Local storage is always the first source: the board is read from it on
//! mount and written to it synchronously on every change. The remote
//! endpoint is consulted only when a token is stored. A non-empty remote
//! board replaces the local one on mount; remote writes are fire-and-forget.
//!
//! # Design
//!
//! - Remote failures are logged as warnings and never surface to callers.
//! - An empty remote board never erases local configuration.
//! - Remote writes run as tokio tasks, one after another in the order they
//!   were started. Their handles are returned so a short-lived process can
//!   wait for them before exiting.

use std::future::Future;
use std::sync::Arc;

use board_api::{ApiError, LayoutRecord, SaveTabRequest, SettingsClient, UserSettings, WidgetDescriptor};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::store::{layout_key, widgets_key, LocalStore, StoreError};


/// Remote settings endpoint.
///
/// Implemented by [`SettingsClient`] for HTTP and by fakes in tests.
pub trait RemoteSettings: Send + Sync + 'static {
    /// Fetch the user's saved board.
    fn fetch(&self, token: &str) -> impl Future<Output = Result<UserSettings, ApiError>> + Send;

    /// Save one tab's arrays.
    fn save(&self, token: &str, request: SaveTabRequest) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl RemoteSettings for SettingsClient {
    fn fetch(&self, token: &str) -> impl Future<Output = Result<UserSettings, ApiError>> + Send {
        self.fetch_settings(token)
    }

    fn save(&self, token: &str, request: SaveTabRequest) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move { self.save_tab(token, &request).await }
    }
}

/// Pick the board to show after a successful fetch.
///
/// The remote board wins only when both remote arrays are non-empty and they
/// pair into a non-empty board. Otherwise `local` is kept.
pub fn reconcile(local: Board, remote: UserSettings) -> Board {
    if !remote.has_board() {
        debug!("remote board is empty, keeping local");
        return local;
    }
    let candidate = Board::from_parts(remote.user_widgets, remote.user_layout);
    if candidate.is_empty() {
        warn!("remote arrays share no identifiers, keeping local");
        return local;
    }
    candidate
}

/// Local/remote persistence for one tab.
pub struct Synchronizer<R> {
    store: LocalStore,
    remote: Option<Arc<R>>,
    tab: u32,
    last_save: Option<oneshot::Receiver<()>>,
}

impl<R: RemoteSettings> Synchronizer<R> {
    /// Creates a synchronizer. `remote` is `None` when running offline.
    pub fn new(store: LocalStore, remote: Option<R>, tab: u32) -> Self {
        Self {
            store,
            remote: remote.map(Arc::new),
            tab,
            last_save: None,
        }
    }

    /// Tab this synchronizer reads and writes.
    pub fn tab(&self) -> u32 {
        self.tab
    }

    /// The local store.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// The local store, mutably (token and widget settings live there too).
    pub fn store_mut(&mut self) -> &mut LocalStore {
        &mut self.store
    }

    /// Read the tab's board from the local store.
    ///
    /// Both arrays are decoded before pairing. If either is missing or
    /// unreadable, or stored widgets pair into nothing, the default board is
    /// used as a whole. Two empty arrays are a board the user emptied.
    pub fn load_local(&self) -> Board {
        let widgets: Option<Vec<WidgetDescriptor>> = self.store.get_json(&widgets_key(self.tab));
        let layout: Option<Vec<LayoutRecord>> = self.store.get_json(&layout_key(self.tab));
        let (Some(widgets), Some(layout)) = (widgets, layout) else {
            debug!(tab = self.tab, "no complete local board, using defaults");
            return Board::defaults();
        };

        let stored = widgets.len();
        let board = Board::from_parts(widgets, layout);
        if board.is_empty() && stored > 0 {
            warn!(tab = self.tab, stored, "local arrays share no identifiers, using defaults");
            return Board::defaults();
        }
        board
    }

    /// Load the board on startup.
    ///
    /// Reads local state, then asks the remote when a token is stored. After
    /// a successful fetch the chosen board is written back locally. A failed
    /// fetch keeps local state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only if writing the fetched board locally fails.
    pub async fn mount(&mut self) -> Result<Board, StoreError> {
        let local = self.load_local();

        let (Some(remote), Some(token)) = (self.remote.as_ref(), self.store.token()) else {
            debug!(widgets = local.len(), "mounted from local store");
            return Ok(local);
        };

        let fetched = remote.fetch(token).await;
        match fetched {
            Ok(settings) => {
                let board = reconcile(local, settings);
                self.write_local(&board)?;
                info!(widgets = board.len(), "mounted after remote fetch");
                Ok(board)
            }
            Err(e) => {
                warn!(error = %e, "remote fetch failed, using local board");
                Ok(local)
            }
        }
    }

    /// Persist `board` locally, then start a remote save if possible.
    ///
    /// Returns the handle of the spawned remote save, or `None` when there is
    /// no remote, no token, or no tokio runtime to spawn on. A save waits for
    /// the one started before it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the local write fails. Remote failures are
    /// only logged.
    pub fn persist(&mut self, board: &Board) -> Result<Option<JoinHandle<()>>, StoreError> {
        self.write_local(board)?;

        let (Some(remote), Some(token)) = (self.remote.as_ref(), self.store.token()) else {
            return Ok(None);
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime, skipping remote save");
            return Ok(None);
        };

        let (user_widgets, user_layout) = board.to_parts();
        let request = SaveTabRequest {
            tab: self.tab,
            user_widgets,
            user_layout,
        };
        let remote = Arc::clone(remote);
        let token = token.to_string();
        let tab = self.tab;
        let (done, finished) = oneshot::channel::<()>();
        let previous = self.last_save.replace(finished);

        Ok(Some(runtime.spawn(async move {
            // Each save waits for the previous one.
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            let _done = done;
            match remote.save(&token, request).await {
                Ok(()) => debug!(tab, "remote save complete"),
                Err(e) => warn!(error = %e, tab, "remote save failed"),
            }
        })))
    }

    fn write_local(&mut self, board: &Board) -> Result<(), StoreError> {
        let widgets_key = widgets_key(self.tab);
        let layout_key = layout_key(self.tab);
        let (widgets, layout) = board.to_parts();
        let widgets = to_json(&widgets_key, &widgets)?;
        let layout = to_json(&layout_key, &layout)?;
        self.store
            .set_json_many(&[(widgets_key.as_str(), widgets), (layout_key.as_str(), layout)])
    }
}

fn to_json<T: serde::Serialize>(key: &str, value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })
}
