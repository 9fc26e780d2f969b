//! Checkpoint ledger
//!
//! Owns the checkpoint table and the authorizer. Mutations take `&mut self`,
//! so one ledger value applies writes one at a time and atomically: a rejected
//! call returns before touching any state.

use crate::checkpoint::{Checkpoint, ShipmentHistory, EMPTY_HISTORY};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use waypoint_authorization::{AdminPolicy, Authorizer, RoleRegistry, SingleAdmin};
use waypoint_core::{
    LedgerEvent, PhysicalClock, PhysicalTime, Principal, Result, Role, SystemClock, WaypointError,
};

/// Result of a committed mutation together with the events it emitted
///
/// The ledger never forwards events itself; callers hand them to an
/// [`EventDispatcher`](crate::EventDispatcher) or drop them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    /// Value produced by the mutation
    pub value: T,
    /// Events emitted, in commit order
    pub events: Vec<LedgerEvent>,
}

impl<T> Committed<T> {
    fn new(value: T, event: LedgerEvent) -> Self {
        Self {
            value,
            events: vec![event],
        }
    }

    /// Split into value and events
    pub fn into_parts(self) -> (T, Vec<LedgerEvent>) {
        (self.value, self.events)
    }
}

/// Role-gated, append-only ledger of checkpoints keyed by shipment
#[derive(Debug, Clone)]
pub struct CheckpointLedger<A = RoleRegistry, C = SystemClock> {
    pub(crate) authorizer: A,
    pub(crate) histories: BTreeMap<String, ShipmentHistory>,
    pub(crate) clock: C,
    pub(crate) last_commit: PhysicalTime,
}

impl CheckpointLedger {
    /// Ledger administered by `administrator`, stamped with the system clock
    pub fn new(administrator: Principal) -> Self {
        Self::with_clock(administrator, SystemClock)
    }
}

impl<C: PhysicalClock> CheckpointLedger<RoleRegistry, C> {
    /// Ledger administered by `administrator` with an injected clock
    pub fn with_clock(administrator: Principal, clock: C) -> Self {
        Self::initialize(SingleAdmin::new(administrator), clock)
    }
}

impl<P: AdminPolicy, C: PhysicalClock> CheckpointLedger<RoleRegistry<P>, C> {
    /// Ledger whose role table is administered under `policy`
    ///
    /// Every administrator starts with [`Role::Inspector`].
    pub fn initialize(policy: P, clock: C) -> Self {
        Self::with_authorizer(RoleRegistry::initialize(policy), clock)
    }

    /// Change `target`'s role; only administrators succeed
    ///
    /// Returns the role now held and a `RoleAssigned` event.
    pub fn assign_role(
        &mut self,
        caller: &Principal,
        target: Principal,
        role: Role,
    ) -> Result<Committed<Role>> {
        let event = self.authorizer.assign_role(caller, target, role)?;
        Ok(Committed::new(role, event))
    }

    /// Current role of `identity`
    pub fn get_role(&self, identity: &Principal) -> Role {
        self.authorizer.get_role(identity)
    }

    /// The role table
    pub fn registry(&self) -> &RoleRegistry<P> {
        &self.authorizer
    }
}

impl<A: Authorizer, C: PhysicalClock> CheckpointLedger<A, C> {
    /// Ledger gated by an arbitrary authorizer
    pub fn with_authorizer(authorizer: A, clock: C) -> Self {
        Self {
            authorizer,
            histories: BTreeMap::new(),
            clock,
            last_commit: PhysicalTime::EPOCH,
        }
    }

    /// Append a checkpoint to `shipment_id`'s history as `caller`
    ///
    /// Fails with [`WaypointError::UnauthorizedAppend`] when the authorizer
    /// refuses `caller`; nothing is appended in that case. No field is
    /// validated: empty strings are accepted everywhere.
    ///
    /// The timestamp is the clock reading clamped to the previous commit, so
    /// committed timestamps never decrease even if the clock steps back.
    pub fn add_checkpoint(
        &mut self,
        caller: &Principal,
        shipment_id: impl Into<String>,
        location: impl Into<String>,
        status: impl Into<String>,
        document_hash: impl Into<String>,
    ) -> Result<Committed<Checkpoint>> {
        let shipment_id = shipment_id.into();
        if !self.authorizer.can_append(caller) {
            warn!(caller = %caller, shipment_id = %shipment_id, "rejected checkpoint append");
            return Err(WaypointError::unauthorized_append(*caller));
        }

        let observed = self.clock.physical_time();
        if observed < self.last_commit {
            debug!(
                observed = observed.as_secs(),
                last_commit = self.last_commit.as_secs(),
                "clock behind last commit; clamping"
            );
        }
        let timestamp = observed.max(self.last_commit);

        let checkpoint = Checkpoint::new(
            shipment_id,
            timestamp,
            location.into(),
            status.into(),
            document_hash.into(),
            *caller,
        );
        let event = LedgerEvent::CheckpointAdded {
            shipment_id: checkpoint.shipment_id().to_owned(),
            timestamp,
            location: checkpoint.location().to_owned(),
            status: checkpoint.status().to_owned(),
            submitted_by: *caller,
        };

        let history = self
            .histories
            .entry(checkpoint.shipment_id().to_owned())
            .or_default();
        history.push(checkpoint.clone());
        self.last_commit = timestamp;

        debug!(
            shipment_id = %checkpoint.shipment_id(),
            status = %checkpoint.status(),
            submitted_by = %caller,
            timestamp = timestamp.as_secs(),
            count = history.len(),
            "checkpoint appended"
        );

        Ok(Committed::new(checkpoint, event))
    }

    /// Full ordered history of `shipment_id`; empty if never written
    pub fn get_shipment_history(&self, shipment_id: &str) -> &ShipmentHistory {
        self.histories.get(shipment_id).unwrap_or(&EMPTY_HISTORY)
    }

    /// Number of checkpoints recorded for `shipment_id`
    pub fn get_checkpoint_count(&self, shipment_id: &str) -> usize {
        self.get_shipment_history(shipment_id).len()
    }

    /// Timestamp of the most recent append, or the epoch if none
    pub fn last_commit(&self) -> PhysicalTime {
        self.last_commit
    }

    /// The authorizer gating appends
    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }
}
