//! Reactive style library
//!
//! A presentation-facing wrapper around [`StyleStore`]: it keeps an
//! in-memory mirror of the collection together with `loading` / `error` /
//! `initialized` flags, and publishes every change as a snapshot on a watch
//! channel. Typed store errors are caught here and recorded as display
//! messages; they never escape to subscribers.
//!
//! The mirror is best-effort: if a persist fails mid-operation the mirror
//! may lag the stored collection until the next `refresh` reconciles it.

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Style, StyleDraft, StylePatch};
use crate::storage::KeyValueStore;
use crate::store::{StorageInfo, StoreError, StyleStore};

/// Snapshot of the library's presentation state
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    /// Mirror of the stored collection
    pub styles: Vec<Style>,
    /// Whether an operation is in flight
    pub loading: bool,
    /// Display message from the most recent failure, if any
    pub error: Option<String>,
    /// Whether the initial load has completed
    pub initialized: bool,
}

impl LibraryState {
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn has_styles(&self) -> bool {
        !self.styles.is_empty()
    }
}

/// Reactive facade over a [`StyleStore`]
pub struct StyleLibrary<S: KeyValueStore> {
    store: StyleStore<S>,
    state: watch::Sender<LibraryState>,
}

impl<S: KeyValueStore> StyleLibrary<S> {
    /// Wrap a store; the initial state is empty and uninitialized
    pub fn new(store: StyleStore<S>) -> Self {
        let (state, _) = watch::channel(LibraryState::default());
        Self { store, state }
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<LibraryState> {
        self.state.subscribe()
    }

    /// Current state snapshot
    pub fn state(&self) -> LibraryState {
        self.state.borrow().clone()
    }

    /// The wrapped store, for callers that want typed errors
    pub fn store(&self) -> &StyleStore<S> {
        &self.store
    }

    /// Reload the mirror from storage
    ///
    /// Returns `false` without touching storage if a load is already in
    /// flight. On failure the mirror is emptied and the error recorded.
    pub async fn refresh(&self) -> bool {
        let mut started = false;
        self.state.send_modify(|s| {
            if !s.loading {
                s.loading = true;
                s.error = None;
                started = true;
            }
        });
        if !started {
            debug!("refresh rejected: load already in flight");
            return false;
        }

        match self.store.load_styles().await {
            Ok(styles) => self.state.send_modify(|s| {
                s.styles = styles;
                s.loading = false;
                s.initialized = true;
            }),
            Err(err) => {
                warn!(error = %err, "failed to load styles");
                self.state.send_modify(|s| {
                    s.styles.clear();
                    s.error = Some(err.to_string());
                    s.loading = false;
                    s.initialized = true;
                });
            }
        }
        true
    }

    /// Create a style; on success the mirror gains the new record
    pub async fn create_style(&self, draft: &StyleDraft) -> Option<Style> {
        self.begin();
        match self.store.add_style(draft).await {
            Ok(style) => {
                self.state.send_modify(|s| {
                    s.styles.push(style.clone());
                    s.loading = false;
                });
                Some(style)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// Update a style; on success the mirror's record is replaced in place
    pub async fn update_style(&self, id: Uuid, patch: &StylePatch) -> Option<Style> {
        self.begin();
        match self.store.update_style(id, patch).await {
            Ok(style) => {
                self.state.send_modify(|s| {
                    if let Some(slot) = s.styles.iter_mut().find(|c| c.id == id) {
                        *slot = style.clone();
                    }
                    s.loading = false;
                });
                Some(style)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    /// Delete a style; on success the mirror drops the record
    pub async fn delete_style(&self, id: Uuid) -> bool {
        self.begin();
        match self.store.delete_style(id).await {
            Ok(_) => {
                self.state.send_modify(|s| {
                    s.styles.retain(|c| c.id != id);
                    s.loading = false;
                });
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Clear every stored style and the mirror
    pub async fn clear_all(&self) -> bool {
        self.begin();
        match self.store.clear_all_styles().await {
            Ok(()) => {
                self.state.send_modify(|s| {
                    s.styles.clear();
                    s.loading = false;
                });
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Answer from the mirror without touching storage
    pub fn get_style_by_id(&self, id: Uuid) -> Option<Style> {
        self.state
            .borrow()
            .styles
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Storage diagnostics, passed through from the store
    pub async fn storage_info(&self) -> Option<StorageInfo> {
        match self.store.storage_info().await {
            Ok(info) => Some(info),
            Err(err) => {
                self.state.send_modify(|s| s.error = Some(err.to_string()));
                None
            }
        }
    }

    /// Drop the recorded error message
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, err: StoreError) {
        warn!(error = %err, "style operation failed");
        self.state.send_modify(|s| {
            s.error = Some(err.to_string());
            s.loading = false;
        });
    }
}
