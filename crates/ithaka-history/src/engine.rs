//! Snapshot capture and restore against a live element store.

use std::fmt;

use tracing::{debug, warn};

use crate::action::{get_action_from_snapshot, HistoryAction};
use crate::snapshot::{is_valid_snapshot, ElementSnapshot};
use crate::store::{ElementStore, Selectable};
use crate::undo_manager::UndoRedoManager;

/// Callback run after every successful restore.
pub type RestoreHook<S> = Box<dyn FnMut(&mut S, &ElementSnapshot)>;

/// What [`SnapshotEngine::restore_snapshot`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The store now holds the snapshot's elements
    Restored,
    /// Restored, but the snapshot was taken on another page
    RestoredAcrossPages {
        snapshot_page: Option<String>,
        current_page: Option<String>,
    },
    /// The snapshot failed validation; the store was not touched
    Skipped(String),
}

impl RestoreOutcome {
    /// True for both restored variants.
    pub fn is_restored(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// Captures and restores the element collection of a store.
///
/// The engine owns its store. Restoring replaces the whole collection with
/// a fresh copy of the snapshot, then runs the registered hooks in order.
pub struct SnapshotEngine<S> {
    store: S,
    hooks: Vec<RestoreHook<S>>,
}

impl<S: ElementStore> SnapshotEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            hooks: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Registers a hook run after each successful restore.
    pub fn on_restore<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&mut S, &ElementSnapshot) + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Deep copy of the current elements and page id.
    pub fn create_snapshot(&self) -> ElementSnapshot {
        let snapshot =
            ElementSnapshot::capture(self.store.current_page_id(), self.store.elements());
        debug!(
            page = snapshot.page_id().unwrap_or("-"),
            count = snapshot.count(),
            "snapshot created"
        );
        snapshot
    }

    /// Replaces the store's elements with a copy of `snapshot`.
    ///
    /// An invalid snapshot is skipped with a warning. A snapshot from
    /// another page is restored anyway and reported as such.
    pub fn restore_snapshot(&mut self, snapshot: &ElementSnapshot) -> RestoreOutcome {
        if !is_valid_snapshot(snapshot) {
            let reason = format!(
                "declared {} elements, found {}",
                snapshot.count(),
                snapshot.elements().len()
            );
            warn!(%reason, "invalid snapshot, restore skipped");
            return RestoreOutcome::Skipped(reason);
        }

        let snapshot_page = snapshot.page_id().map(str::to_owned);
        let current_page = self.store.current_page_id().map(str::to_owned);
        if snapshot_page != current_page {
            warn!(
                snapshot_page = snapshot_page.as_deref().unwrap_or("-"),
                current_page = current_page.as_deref().unwrap_or("-"),
                "restoring snapshot taken on another page"
            );
        }

        self.store.replace_elements(snapshot.clone_elements());
        for hook in self.hooks.iter_mut() {
            hook(&mut self.store, snapshot);
        }
        debug!(count = snapshot.count(), "snapshot restored");

        if snapshot_page == current_page {
            RestoreOutcome::Restored
        } else {
            RestoreOutcome::RestoredAcrossPages {
                snapshot_page,
                current_page,
            }
        }
    }

    /// Snapshots around `edit` and pairs the result into an action.
    pub fn track<F>(&mut self, description: Option<&str>, edit: F) -> HistoryAction
    where
        F: FnOnce(&mut S),
    {
        let before = self.create_snapshot();
        edit(&mut self.store);
        let after = self.create_snapshot();
        get_action_from_snapshot(before, after, description)
    }

    /// Runs `edit` and records it on `history` unless it changed nothing.
    ///
    /// Returns whether an action was recorded.
    pub fn record_edit<F>(
        &mut self,
        history: &mut UndoRedoManager,
        description: Option<&str>,
        edit: F,
    ) -> bool
    where
        F: FnOnce(&mut S),
    {
        let action = self.track(description, edit);
        if action.is_noop() {
            debug!(description = action.description(), "edit changed nothing, not recorded");
            return false;
        }
        history.record(action);
        true
    }

    /// Restores the state before the last recorded action.
    ///
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self, history: &mut UndoRedoManager) -> Option<RestoreOutcome> {
        let snapshot = history.undo()?;
        Some(self.restore_snapshot(snapshot))
    }

    /// Restores the state after the last undone action.
    pub fn redo(&mut self, history: &mut UndoRedoManager) -> Option<RestoreOutcome> {
        let snapshot = history.redo()?;
        Some(self.restore_snapshot(snapshot))
    }
}

impl<S: ElementStore + Selectable> SnapshotEngine<S> {
    /// Engine whose restores clear the store's selection, since selected
    /// ids may no longer exist afterwards.
    pub fn with_selection_clearing(store: S) -> Self {
        let mut engine = Self::new(store);
        engine.on_restore(|store, _| store.deselect_all());
        engine
    }
}

impl<S: fmt::Debug> fmt::Debug for SnapshotEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotEngine")
            .field("store", &self.store)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
