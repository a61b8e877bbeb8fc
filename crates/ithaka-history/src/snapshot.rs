//! Immutable captures of a page's element collection.
//!
//! Elements are plain JSON values. Cloning a [`serde_json::Value`] is a full
//! structural copy, so a snapshot never shares data with the live store and
//! can be restored any number of times.

use std::io;

use chrono::{DateTime, Utc};
use ithaka_core::{Result, SnapshotError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One positioned element record (text, image, shape, sticker, ...).
pub type Element = Value;

/// Full copy of the element collection at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    timestamp: DateTime<Utc>,
    page_id: Option<String>,
    elements: Vec<Element>,
    count: usize,
}

impl ElementSnapshot {
    /// Wraps `elements`, stamping the current time and element count.
    pub fn new(page_id: Option<String>, elements: Vec<Element>) -> Self {
        let count = elements.len();
        Self {
            timestamp: Utc::now(),
            page_id,
            elements,
            count,
        }
    }

    /// Deep-copies a borrowed collection into a new snapshot.
    pub fn capture(page_id: Option<&str>, elements: &[Element]) -> Self {
        Self::new(page_id.map(str::to_owned), elements.to_vec())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn page_id(&self) -> Option<&str> {
        self.page_id.as_deref()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Declared element count. Only a snapshot decoded from untrusted data
    /// can disagree with `elements().len()`.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Fresh deep copy of the elements, for writing back into a store.
    pub fn clone_elements(&self) -> Vec<Element> {
        self.elements.clone()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self).map_err(SnapshotError::from)?)
    }

    /// Decodes a snapshot, rejecting payloads that fail [`is_valid_snapshot_value`].
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(SnapshotError::from)?;
        check_snapshot_value(&value)?;
        Ok(serde_json::from_value(value).map_err(SnapshotError::from)?)
    }
}

/// Structural equality, ignoring timestamps.
///
/// Element order matters: the same elements in a different order are a
/// different stacking and compare unequal.
pub fn are_snapshots_equal(a: &ElementSnapshot, b: &ElementSnapshot) -> bool {
    a.count == b.count && a.page_id == b.page_id && a.elements == b.elements
}

/// Approximate memory footprint: the length of the JSON encoding in bytes.
pub fn get_snapshot_size(snapshot: &ElementSnapshot) -> usize {
    let mut counter = ByteCounter(0);
    match serde_json::to_writer(&mut counter, snapshot) {
        Ok(()) => counter.0,
        Err(_) => 0,
    }
}

/// True when the declared count matches the element list.
pub fn is_valid_snapshot(snapshot: &ElementSnapshot) -> bool {
    snapshot.count == snapshot.elements.len()
}

/// Shape check for a snapshot held as raw JSON: an object with a
/// `timestamp` string, an optional `pageId` string, an `elements` array,
/// and a `count` equal to its length.
pub fn is_valid_snapshot_value(value: &Value) -> bool {
    check_snapshot_value(value).is_ok()
}

fn check_snapshot_value(value: &Value) -> std::result::Result<(), SnapshotError> {
    let malformed = |reason: &str| SnapshotError::Malformed {
        reason: reason.to_string(),
    };

    let object = value.as_object().ok_or_else(|| malformed("not an object"))?;
    if !object.get("timestamp").is_some_and(Value::is_string) {
        return Err(malformed("missing timestamp"));
    }
    match object.get("pageId") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => return Err(malformed("pageId must be a string or null")),
    }
    let elements = object
        .get("elements")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("elements must be an array"))?;
    let count = object
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed("count must be a non-negative integer"))?;

    let count = usize::try_from(count).map_err(|_| malformed("count out of range"))?;
    if count != elements.len() {
        return Err(SnapshotError::CountMismatch {
            count,
            actual: elements.len(),
        });
    }
    Ok(())
}

struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<Element> {
        vec![
            json!({"id": "a", "type": "text", "x": 10, "y": 20, "style": {"font": "Lora"}}),
            json!({"id": "b", "type": "image", "x": 0, "y": 0, "crop": [1, 2, 3, 4]}),
        ]
    }

    #[test]
    fn test_new_counts_elements() {
        let snap = ElementSnapshot::new(Some("p1".into()), sample());
        assert_eq!(snap.count(), 2);
        assert_eq!(snap.page_id(), Some("p1"));
        assert!(is_valid_snapshot(&snap));
    }

    #[test]
    fn test_capture_is_isolated_from_source() {
        let mut live = sample();
        let snap = ElementSnapshot::capture(Some("p1"), &live);
        live[0]["style"]["font"] = json!("Inter");
        live.pop();
        assert_eq!(snap.elements()[0]["style"]["font"], "Lora");
        assert_eq!(snap.count(), 2);
    }

    #[test]
    fn test_equality_ignores_timestamp() {
        let a = ElementSnapshot::new(Some("p1".into()), sample());
        let b = ElementSnapshot::new(Some("p1".into()), sample());
        assert!(are_snapshots_equal(&a, &b));
    }

    #[test]
    fn test_equality_rejects_page_mismatch() {
        let a = ElementSnapshot::new(Some("p1".into()), sample());
        let b = ElementSnapshot::new(Some("p2".into()), sample());
        assert!(!are_snapshots_equal(&a, &b));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let mut reversed = sample();
        reversed.reverse();
        let a = ElementSnapshot::new(None, sample());
        let b = ElementSnapshot::new(None, reversed);
        assert!(!are_snapshots_equal(&a, &b));
    }

    #[test]
    fn test_size_matches_json_length() {
        let snap = ElementSnapshot::new(Some("p1".into()), sample());
        let json = snap.to_json().unwrap();
        assert_eq!(get_snapshot_size(&snap), json.len());
        assert!(get_snapshot_size(&snap) > get_snapshot_size(&ElementSnapshot::new(None, vec![])));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let snap = ElementSnapshot::new(Some("p1".into()), vec![]);
        let value: Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(value["pageId"], "p1");
        assert_eq!(value["count"], 0);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_from_json_round_trip() {
        let snap = ElementSnapshot::new(Some("p1".into()), sample());
        let decoded = ElementSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
        assert!(are_snapshots_equal(&snap, &decoded));
        assert_eq!(decoded.timestamp(), snap.timestamp());
    }

    #[test]
    fn test_from_json_rejects_count_mismatch() {
        let json = r#"{"timestamp":"2025-01-01T00:00:00Z","pageId":null,"elements":[{}],"count":3}"#;
        let err = ElementSnapshot::from_json(json).unwrap_err();
        assert!(err.is_snapshot_error());
        assert!(err.to_string().contains("declared 3"));
    }

    #[test]
    fn test_value_validation() {
        assert!(is_valid_snapshot_value(&json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "pageId": "p1",
            "elements": [],
            "count": 0
        })));
        assert!(!is_valid_snapshot_value(&json!({"timestamp": "t", "count": 0})));
        assert!(!is_valid_snapshot_value(&json!({
            "timestamp": "t", "elements": {}, "count": 0
        })));
        assert!(!is_valid_snapshot_value(&json!({
            "timestamp": "t", "pageId": 7, "elements": [], "count": 0
        })));
        assert!(!is_valid_snapshot_value(&json!([1, 2])));
    }

    #[test]
    fn test_deserialized_mismatch_is_invalid() {
        let snap: ElementSnapshot = serde_json::from_value(json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "pageId": null,
            "elements": [],
            "count": 2
        }))
        .unwrap();
        assert!(!is_valid_snapshot(&snap));
    }
}
