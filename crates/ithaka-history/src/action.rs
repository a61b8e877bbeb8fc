//! Before/after pairs handed to the undo/redo stack.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::snapshot::{are_snapshots_equal, ElementSnapshot};

/// One undoable edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAction {
    id: String,
    description: String,
    before_snapshot: ElementSnapshot,
    after_snapshot: ElementSnapshot,
    timestamp: DateTime<Utc>,
}

impl HistoryAction {
    /// Unique per action: `action_<unix millis>_<9 random hex chars>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// State to restore on undo.
    pub fn before_snapshot(&self) -> &ElementSnapshot {
        &self.before_snapshot
    }

    /// State to restore on redo.
    pub fn after_snapshot(&self) -> &ElementSnapshot {
        &self.after_snapshot
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True when both snapshots hold the same state.
    pub fn is_noop(&self) -> bool {
        are_snapshots_equal(&self.before_snapshot, &self.after_snapshot)
    }
}

/// Pairs two snapshots into an action.
///
/// Without a `description`, one is derived from the change: a count
/// increase reads "Add element (N)", a decrease "Delete element (N)", a
/// content change "Update element". No-op pairs are still built and get
/// the generic "Element modification".
pub fn get_action_from_snapshot(
    before: ElementSnapshot,
    after: ElementSnapshot,
    description: Option<&str>,
) -> HistoryAction {
    let description = match description {
        Some(text) => text.to_string(),
        None => describe_change(&before, &after),
    };

    HistoryAction {
        id: generate_action_id(),
        description,
        before_snapshot: before,
        after_snapshot: after,
        timestamp: Utc::now(),
    }
}

/// Default label for the change between two snapshots.
pub fn describe_change(before: &ElementSnapshot, after: &ElementSnapshot) -> String {
    match after.count().cmp(&before.count()) {
        Ordering::Greater => format!("Add element ({})", after.count() - before.count()),
        Ordering::Less => format!("Delete element ({})", before.count() - after.count()),
        Ordering::Equal if before.elements() != after.elements() => "Update element".to_string(),
        Ordering::Equal => "Element modification".to_string(),
    }
}

fn generate_action_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("action_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}
