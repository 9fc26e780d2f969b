//! Read-only history queries
//!
//! Convenience views used by dashboards and submission clients. None of them
//! are authorized; history is public.

use crate::checkpoint::Checkpoint;
use crate::ledger::CheckpointLedger;
use std::collections::BTreeMap;
use waypoint_authorization::Authorizer;
use waypoint_core::{PhysicalClock, Principal};

impl<A: Authorizer, C: PhysicalClock> CheckpointLedger<A, C> {
    /// Most recent checkpoint of `shipment_id`
    pub fn latest_checkpoint(&self, shipment_id: &str) -> Option<&Checkpoint> {
        self.get_shipment_history(shipment_id).latest()
    }

    /// Shipments with at least one checkpoint, sorted
    pub fn shipment_ids(&self) -> Vec<String> {
        self.histories.keys().cloned().collect()
    }

    /// Number of shipments by the status of their latest checkpoint
    pub fn status_distribution(&self) -> BTreeMap<String, usize> {
        let mut distribution = BTreeMap::new();
        for latest in self.histories.values().filter_map(|h| h.latest()) {
            *distribution.entry(latest.status().to_owned()).or_insert(0) += 1;
        }
        distribution
    }

    /// Checkpoints submitted by `identity`, shipments in id order
    pub fn checkpoints_by(&self, identity: &Principal) -> Vec<&Checkpoint> {
        self.histories
            .values()
            .flat_map(|history| history.iter())
            .filter(|checkpoint| checkpoint.submitted_by() == *identity)
            .collect()
    }
}
