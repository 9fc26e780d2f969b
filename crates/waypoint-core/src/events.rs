//! Ledger notifications
//!
//! Every committed mutation produces exactly one [`LedgerEvent`]. Events are
//! plain data; forwarding them to subscribers is the job of a dispatcher in
//! `waypoint-journal`, so this crate stays free of any transport.

use crate::{PhysicalTime, Principal, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification emitted when a mutation commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LedgerEvent {
    /// A role assignment was written
    RoleAssigned {
        /// Identity whose role changed
        identity: Principal,
        /// Role now held
        role: Role,
    },

    /// A checkpoint was appended
    CheckpointAdded {
        /// Shipment the checkpoint belongs to
        shipment_id: String,
        /// Commit time of the append
        timestamp: PhysicalTime,
        /// Reported location
        location: String,
        /// Reported lifecycle status
        status: String,
        /// Caller that submitted the checkpoint
        submitted_by: Principal,
    },
}

impl LedgerEvent {
    /// Shipment this event concerns, if any
    pub fn shipment_id(&self) -> Option<&str> {
        match self {
            LedgerEvent::CheckpointAdded { shipment_id, .. } => Some(shipment_id),
            LedgerEvent::RoleAssigned { .. } => None,
        }
    }

    /// Short event name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::RoleAssigned { .. } => "RoleAssigned",
            LedgerEvent::CheckpointAdded { .. } => "CheckpointAdded",
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::RoleAssigned { identity, role } => {
                write!(f, "RoleAssigned({identity}, {role})")
            }
            LedgerEvent::CheckpointAdded {
                shipment_id,
                timestamp,
                location,
                status,
                submitted_by,
            } => write!(
                f,
                "CheckpointAdded({shipment_id}, {}, {location}, {status}, {submitted_by})",
                timestamp.as_secs()
            ),
        }
    }
}

/// An event stamped with its position in the dispatch order
///
/// Sequence numbers start at 1 and increase by one per dispatched event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Position in dispatch order
    pub sequence: u64,
    /// The event itself
    pub event: LedgerEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_filter_key() {
        let who = Principal::from_bytes([3; 20]);
        let role = LedgerEvent::RoleAssigned {
            identity: who,
            role: Role::Courier,
        };
        assert_eq!(role.shipment_id(), None);

        let added = LedgerEvent::CheckpointAdded {
            shipment_id: "SHIP-1".into(),
            timestamp: PhysicalTime(10),
            location: "Factory".into(),
            status: "created".into(),
            submitted_by: who,
        };
        assert_eq!(added.shipment_id(), Some("SHIP-1"));
        assert_eq!(added.name(), "CheckpointAdded");
    }

    #[test]
    fn test_json_is_tagged() {
        let event = LedgerEvent::RoleAssigned {
            identity: Principal::from_bytes([0; 20]),
            role: Role::Inspector,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "RoleAssigned");
        assert_eq!(json["role"], "Inspector");
    }
}
