//! Ledger snapshots
//!
//! A snapshot is the persisted state layout: the role table (with its admin
//! policy) and the checkpoint table, plus the last commit time so restored
//! ledgers keep timestamps non-decreasing.

use crate::checkpoint::ShipmentHistory;
use crate::ledger::CheckpointLedger;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use waypoint_authorization::{AdminPolicy, RoleRegistry, SingleAdmin};
use waypoint_core::{PhysicalClock, PhysicalTime, Result, WaypointError};

/// Current snapshot encoding version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Serializable copy of a ledger's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot<P = SingleAdmin> {
    /// Encoding version; must equal [`SNAPSHOT_FORMAT_VERSION`] to restore
    pub format_version: u32,
    /// Role table and admin policy
    pub registry: RoleRegistry<P>,
    /// Checkpoint table keyed by shipment
    pub histories: BTreeMap<String, ShipmentHistory>,
    /// Timestamp of the most recent append
    pub last_commit: PhysicalTime,
}

impl<P> LedgerSnapshot<P>
where
    P: AdminPolicy + Serialize + DeserializeOwned,
{
    /// Check the structural invariants a restored ledger relies on
    ///
    /// Every checkpoint must sit under its own shipment key, timestamps must be
    /// non-decreasing within each history, and none may exceed `last_commit`.
    pub fn verify(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(WaypointError::invalid(format!(
                "unsupported snapshot format version {} (expected {SNAPSHOT_FORMAT_VERSION})",
                self.format_version
            )));
        }

        for (shipment_id, history) in &self.histories {
            let mut previous = PhysicalTime::EPOCH;
            for checkpoint in history {
                if checkpoint.shipment_id() != shipment_id {
                    return Err(WaypointError::invalid(format!(
                        "checkpoint for '{}' stored under '{shipment_id}'",
                        checkpoint.shipment_id()
                    )));
                }
                if checkpoint.timestamp() < previous || checkpoint.timestamp() > self.last_commit
                {
                    return Err(WaypointError::invalid(format!(
                        "history of '{shipment_id}' is out of commit order"
                    )));
                }
                previous = checkpoint.timestamp();
            }
        }
        Ok(())
    }

    /// Encode as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON and verify
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.verify()?;
        Ok(snapshot)
    }

    /// Write to `path`, replacing any existing file
    ///
    /// Writes a uniquely named temporary file in the same directory, syncs it
    /// and renames it into place, so concurrent writers never share a
    /// temporary and readers only ever see a complete snapshot.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(path = %path.display(), shipments = self.histories.len(), "snapshot saved");
        Ok(())
    }

    /// Read and verify a snapshot from `path`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        debug!(path = %path.display(), shipments = snapshot.histories.len(), "snapshot loaded");
        Ok(snapshot)
    }
}

impl<P, C> CheckpointLedger<RoleRegistry<P>, C>
where
    P: AdminPolicy + Clone,
    C: PhysicalClock,
{
    /// Copy of the current state
    pub fn snapshot(&self) -> LedgerSnapshot<P> {
        LedgerSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            registry: self.authorizer.clone(),
            histories: self.histories.clone(),
            last_commit: self.last_commit,
        }
    }

    /// Rebuild a ledger from a verified snapshot
    pub fn restore(snapshot: LedgerSnapshot<P>, clock: C) -> Result<Self>
    where
        P: Serialize + DeserializeOwned,
    {
        snapshot.verify()?;
        debug!(
            shipments = snapshot.histories.len(),
            last_commit = snapshot.last_commit.as_secs(),
            "ledger restored from snapshot"
        );
        Ok(Self {
            authorizer: snapshot.registry,
            histories: snapshot.histories,
            clock,
            last_commit: snapshot.last_commit,
        })
    }
}
