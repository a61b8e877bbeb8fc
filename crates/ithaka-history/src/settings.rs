//! Undo/redo stack limits.

use serde::{Deserialize, Serialize};

/// Default number of actions kept on the undo stack.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Default cap on the serialized size of all held actions (10 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: usize = 10 * 1024 * 1024;

/// Limits for [`crate::UndoRedoManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Undo stack length before the oldest action is evicted
    pub max_depth: usize,
    /// Snapshot bytes held across both stacks before eviction
    pub max_total_bytes: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
        }
    }
}
