//! Checkpoint records and per-shipment histories

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use waypoint_core::{PhysicalTime, Principal};

/// One immutable record of a shipment's state
///
/// Only the ledger creates checkpoints, so `timestamp` is always the commit
/// time and `submitted_by` is always the authenticated caller of the append.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checkpoint {
    shipment_id: String,
    timestamp: PhysicalTime,
    location: String,
    status: String,
    document_hash: String,
    submitted_by: Principal,
}

impl Checkpoint {
    pub(crate) fn new(
        shipment_id: String,
        timestamp: PhysicalTime,
        location: String,
        status: String,
        document_hash: String,
        submitted_by: Principal,
    ) -> Self {
        Self {
            shipment_id,
            timestamp,
            location,
            status,
            document_hash,
            submitted_by,
        }
    }

    /// Shipment this checkpoint belongs to
    pub fn shipment_id(&self) -> &str {
        &self.shipment_id
    }

    /// Commit time
    pub fn timestamp(&self) -> PhysicalTime {
        self.timestamp
    }

    /// Reported location
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Free-form lifecycle status
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Opaque document reference; may be empty
    pub fn document_hash(&self) -> &str {
        &self.document_hash
    }

    /// Identity that appended this checkpoint
    pub fn submitted_by(&self) -> Principal {
        self.submitted_by
    }
}

/// Insertion-ordered checkpoints of one shipment
///
/// Grows only at the end. Dereferences to a slice for reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentHistory(Vec<Checkpoint>);

/// History returned for shipments that have never been written
pub(crate) static EMPTY_HISTORY: ShipmentHistory = ShipmentHistory(Vec::new());

impl ShipmentHistory {
    pub(crate) fn push(&mut self, checkpoint: Checkpoint) {
        self.0.push(checkpoint);
    }

    /// Most recent checkpoint
    pub fn latest(&self) -> Option<&Checkpoint> {
        self.0.last()
    }

    /// Whether the latest checkpoint already reports this location and status
    ///
    /// Both sides are trimmed and compared ignoring ASCII case. Advisory only:
    /// submission clients use it to warn before a repeat append; the ledger
    /// accepts duplicates.
    pub fn duplicates_latest(&self, location: &str, status: &str) -> bool {
        self.latest().is_some_and(|latest| {
            latest
                .location()
                .trim()
                .eq_ignore_ascii_case(location.trim())
                && latest.status().trim().eq_ignore_ascii_case(status.trim())
        })
    }

    /// Checkpoints as a slice
    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.0
    }
}

impl Deref for ShipmentHistory {
    type Target = [Checkpoint];

    fn deref(&self) -> &[Checkpoint] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ShipmentHistory {
    type Item = &'a Checkpoint;
    type IntoIter = std::slice::Iter<'a, Checkpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<ShipmentHistory> for Vec<Checkpoint> {
    fn from(history: ShipmentHistory) -> Self {
        history.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(location: &str, status: &str) -> Checkpoint {
        Checkpoint::new(
            "SHIP-1".into(),
            PhysicalTime(1),
            location.into(),
            status.into(),
            String::new(),
            Principal::from_bytes([1; 20]),
        )
    }

    #[test]
    fn test_duplicate_detection_ignores_case_and_padding() {
        let mut history = ShipmentHistory::default();
        assert!(!history.duplicates_latest("Factory", "created"));

        history.push(checkpoint("Factory", "created"));
        assert!(history.duplicates_latest("  factory ", "CREATED"));
        assert!(!history.duplicates_latest("Factory", "in-transit"));

        history.push(checkpoint("Border", "in-transit"));
        assert!(!history.duplicates_latest("Factory", "created"));
    }

    #[test]
    fn test_empty_history() {
        assert!(EMPTY_HISTORY.is_empty());
        assert!(EMPTY_HISTORY.latest().is_none());
    }
}
