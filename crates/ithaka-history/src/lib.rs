//! # Ithaka History
//!
//! Snapshot-based undo/redo for the page editor.
//!
//! Before an element edit the caller captures an [`ElementSnapshot`], after
//! the edit a second one; [`get_action_from_snapshot`] pairs them into a
//! [`HistoryAction`] and the [`UndoRedoManager`] stacks the actions. Undo and
//! redo hand back the snapshot to restore, which [`SnapshotEngine`] writes
//! into the live store.
//!
//! ```
//! use ithaka_history::{PageStore, SnapshotEngine, UndoRedoManager};
//! use serde_json::json;
//!
//! let mut engine = SnapshotEngine::with_selection_clearing(PageStore::new("page-1"));
//! let mut history = UndoRedoManager::new();
//!
//! engine.record_edit(&mut history, None, |store| store.push(json!({"id": "t1", "type": "text"})));
//! assert_eq!(history.peek_undo_description(), Some("Add element (1)"));
//!
//! engine.undo(&mut history);
//! assert!(engine.store().is_empty());
//! engine.redo(&mut history);
//! assert_eq!(engine.store().len(), 1);
//! ```

pub mod action;
pub mod engine;
pub mod settings;
pub mod snapshot;
pub mod store;
pub mod undo_manager;

pub use action::{describe_change, get_action_from_snapshot, HistoryAction};
pub use engine::{RestoreHook, RestoreOutcome, SnapshotEngine};
pub use settings::{HistorySettings, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TOTAL_BYTES};
pub use snapshot::{
    are_snapshots_equal, get_snapshot_size, is_valid_snapshot, is_valid_snapshot_value, Element,
    ElementSnapshot,
};
pub use store::{ElementStore, PageStore, Selectable};
pub use undo_manager::UndoRedoManager;
