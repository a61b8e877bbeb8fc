//! Bounded undo/redo stack of history actions

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::action::HistoryAction;
use crate::settings::HistorySettings;
use crate::snapshot::{get_snapshot_size, ElementSnapshot};

/// An action plus its cached footprint
#[derive(Debug, Clone)]
struct Entry {
    action: HistoryAction,
    bytes: usize,
}

impl Entry {
    fn new(action: HistoryAction) -> Self {
        let bytes =
            get_snapshot_size(action.before_snapshot()) + get_snapshot_size(action.after_snapshot());
        Self { action, bytes }
    }
}

/// Manages undo/redo stacks of element edits
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<Entry>,
    redo_stack: Vec<Entry>,
    max_depth: usize,
    max_total_bytes: usize,
    total_bytes: usize,
}

impl UndoRedoManager {
    /// Create a manager with the default limits
    pub fn new() -> Self {
        Self::with_settings(HistorySettings::default())
    }

    /// Create with custom limits. A depth of 0 is raised to 1.
    pub fn with_settings(settings: HistorySettings) -> Self {
        let max_depth = settings.max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
            max_total_bytes: settings.max_total_bytes,
            total_bytes: 0,
        }
    }

    /// Create with custom maximum undo depth and no byte limit
    pub fn with_depth(max_depth: usize) -> Self {
        Self::with_settings(HistorySettings {
            max_depth,
            max_total_bytes: usize::MAX,
        })
    }

    /// Push an action to the undo stack
    ///
    /// Clears the redo stack, then evicts the oldest actions while the
    /// depth or byte limit is exceeded. The newest action is always kept.
    pub fn record(&mut self, action: HistoryAction) {
        for dropped in self.redo_stack.drain(..) {
            self.total_bytes -= dropped.bytes;
        }

        let entry = Entry::new(action);
        debug!(
            id = entry.action.id(),
            description = entry.action.description(),
            bytes = entry.bytes,
            "history action recorded"
        );
        self.total_bytes += entry.bytes;
        self.undo_stack.push_back(entry);

        while self.undo_stack.len() > 1
            && (self.undo_stack.len() > self.max_depth || self.total_bytes > self.max_total_bytes)
        {
            if let Some(evicted) = self.undo_stack.pop_front() {
                self.total_bytes -= evicted.bytes;
                warn!(
                    id = evicted.action.id(),
                    description = evicted.action.description(),
                    depth = self.undo_stack.len(),
                    total_bytes = self.total_bytes,
                    "history limit reached, oldest action evicted"
                );
            }
        }
    }

    /// Undo the last action, returning the snapshot to restore
    pub fn undo(&mut self) -> Option<&ElementSnapshot> {
        let entry = self.undo_stack.pop_back()?;
        debug!(id = entry.action.id(), "undo");
        self.redo_stack.push(entry);
        self.redo_stack.last().map(|e| e.action.before_snapshot())
    }

    /// Redo the last undone action, returning the snapshot to restore
    pub fn redo(&mut self) -> Option<&ElementSnapshot> {
        let entry = self.redo_stack.pop()?;
        debug!(id = entry.action.id(), "redo");
        self.undo_stack.push_back(entry);
        self.undo_stack.back().map(|e| e.action.after_snapshot())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo operations available
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo operations available
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Serialized size of every held action
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Label for an "Undo ..." menu entry
    pub fn peek_undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.action.description())
    }

    /// Label for a "Redo ..." menu entry
    pub fn peek_redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.action.description())
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.total_bytes = 0;
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::get_action_from_snapshot;
    use serde_json::json;

    // Fixed timestamps keep serialized sizes stable between calls.
    fn snap(n: usize) -> ElementSnapshot {
        let elements: Vec<_> = (0..n).map(|i| json!({"id": format!("e{i}")})).collect();
        serde_json::from_value(json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "pageId": "p1",
            "elements": elements,
            "count": n,
        }))
        .unwrap()
    }

    fn action(from: usize, to: usize) -> HistoryAction {
        get_action_from_snapshot(snap(from), snap(to), None)
    }

    #[test]
    fn test_undo_redo_walks_snapshots() {
        let mut m = UndoRedoManager::new();
        m.record(action(0, 1));
        m.record(action(1, 2));

        assert_eq!(m.undo().map(|s| s.count()), Some(1));
        assert_eq!(m.undo().map(|s| s.count()), Some(0));
        assert!(m.undo().is_none());
        assert_eq!(m.redo().map(|s| s.count()), Some(1));
        assert_eq!(m.redo().map(|s| s.count()), Some(2));
        assert!(m.redo().is_none());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut m = UndoRedoManager::new();
        m.record(action(0, 1));
        m.undo();
        assert!(m.can_redo());
        m.record(action(0, 3));
        assert!(!m.can_redo());
        assert_eq!(m.undo_depth(), 1);
    }

    #[test]
    fn test_depth_limit_evicts_oldest() {
        let mut m = UndoRedoManager::with_depth(3);
        for i in 0..5 {
            m.record(action(i, i + 1));
        }
        assert_eq!(m.undo_depth(), 3);
        assert_eq!(m.undo().map(|s| s.count()), Some(4));
        m.undo();
        assert_eq!(m.undo().map(|s| s.count()), Some(2));
        assert!(!m.can_undo());
    }

    #[test]
    fn test_byte_limit_evicts_but_keeps_newest() {
        let one = Entry::new(action(0, 1)).bytes;
        let mut m = UndoRedoManager::with_settings(HistorySettings {
            max_depth: 100,
            max_total_bytes: one * 2,
        });
        m.record(action(0, 1));
        m.record(action(0, 1));
        assert_eq!(m.undo_depth(), 2);
        m.record(action(0, 1));
        assert_eq!(m.undo_depth(), 2);
        assert!(m.total_bytes() <= one * 2);

        let mut tiny = UndoRedoManager::with_settings(HistorySettings {
            max_depth: 100,
            max_total_bytes: 1,
        });
        tiny.record(action(0, 1));
        tiny.record(action(1, 2));
        assert_eq!(tiny.undo_depth(), 1);
    }

    #[test]
    fn test_byte_accounting_follows_stacks() {
        let mut m = UndoRedoManager::new();
        m.record(action(0, 1));
        let held = m.total_bytes();
        assert!(held > 0);
        m.undo();
        assert_eq!(m.total_bytes(), held);
        m.record(action(0, 2));
        assert_eq!(m.total_bytes(), Entry::new(action(0, 2)).bytes);
        m.clear();
        assert_eq!(m.total_bytes(), 0);
        assert!(!m.can_undo());
    }

    #[test]
    fn test_peek_descriptions() {
        let mut m = UndoRedoManager::new();
        assert!(m.peek_undo_description().is_none());
        m.record(action(0, 2));
        assert_eq!(m.peek_undo_description(), Some("Add element (2)"));
        m.undo();
        assert_eq!(m.peek_redo_description(), Some("Add element (2)"));
        assert!(m.peek_undo_description().is_none());
    }

    #[test]
    fn test_zero_depth_is_raised() {
        let mut m = UndoRedoManager::with_depth(0);
        m.record(action(0, 1));
        assert!(m.can_undo());
    }
}
