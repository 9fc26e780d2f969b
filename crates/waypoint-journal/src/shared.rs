//! Thread-safe ledger handle
//!
//! Ledger state sits behind one `RwLock`; a single global writer lock keeps
//! role checks and appends atomic with respect to each other. Writers first
//! take the dispatch lock, commit under the state write lock, release it, and
//! only then notify subscribers. Holding the dispatch lock across commit and
//! fan-out keeps notifications in commit order, while subscribers stay free to
//! read the ledger from `on_event`. Readers receive owned copies.

use crate::checkpoint::{Checkpoint, ShipmentHistory};
use crate::dispatch::{EventDispatcher, EventSubscriber};
use crate::ledger::CheckpointLedger;
use crate::snapshot::LedgerSnapshot;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use waypoint_authorization::{AdminPolicy, RoleRegistry, SingleAdmin};
use waypoint_core::{
    LedgerEvent, PhysicalClock, Principal, Result, Role, SequencedEvent, SystemClock,
};

struct Inner<P, C> {
    state: RwLock<CheckpointLedger<RoleRegistry<P>, C>>,
    dispatcher: Mutex<EventDispatcher>,
    published: AtomicU64,
}

/// Cloneable, lock-protected ledger with event dispatch
///
/// Subscribers may call any read method from `on_event`. They must not
/// mutate the ledger or subscribe from inside `on_event`: both wait on the
/// dispatch lock held for the duration of the fan-out.
pub struct SharedLedger<P = SingleAdmin, C = SystemClock> {
    inner: Arc<Inner<P, C>>,
}

impl<P, C> Clone for SharedLedger<P, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: AdminPolicy, C: PhysicalClock> SharedLedger<P, C> {
    /// Wrap a ledger; no subscribers yet
    pub fn new(ledger: CheckpointLedger<RoleRegistry<P>, C>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(ledger),
                dispatcher: Mutex::new(EventDispatcher::new()),
                published: AtomicU64::new(0),
            }),
        }
    }

    /// Register a subscriber for all events committed from now on
    pub fn subscribe(&self, subscriber: Arc<dyn EventSubscriber>) {
        self.inner.dispatcher.lock().subscribe(subscriber);
    }

    /// Change `target`'s role as `caller` and notify subscribers
    ///
    /// Returns the dispatched events.
    pub fn assign_role(
        &self,
        caller: &Principal,
        target: Principal,
        role: Role,
    ) -> Result<Vec<SequencedEvent>> {
        let mut dispatcher = self.inner.dispatcher.lock();
        let committed = self.inner.state.write().assign_role(caller, target, role)?;
        Ok(self.publish(&mut dispatcher, committed.events))
    }

    /// Append a checkpoint as `caller` and notify subscribers
    pub fn add_checkpoint(
        &self,
        caller: &Principal,
        shipment_id: impl Into<String>,
        location: impl Into<String>,
        status: impl Into<String>,
        document_hash: impl Into<String>,
    ) -> Result<Checkpoint> {
        let mut dispatcher = self.inner.dispatcher.lock();
        let (checkpoint, events) = self
            .inner
            .state
            .write()
            .add_checkpoint(caller, shipment_id, location, status, document_hash)?
            .into_parts();
        self.publish(&mut dispatcher, events);
        Ok(checkpoint)
    }

    /// Fan out committed events; the state lock must already be released
    fn publish(
        &self,
        dispatcher: &mut EventDispatcher,
        events: Vec<LedgerEvent>,
    ) -> Vec<SequencedEvent> {
        let dispatched = dispatcher.dispatch(events);
        self.inner
            .published
            .store(dispatcher.last_sequence(), Ordering::Release);
        dispatched
    }

    /// Current role of `identity`
    pub fn get_role(&self, identity: &Principal) -> Role {
        self.inner.state.read().get_role(identity)
    }

    /// Copy of `shipment_id`'s history
    pub fn get_shipment_history(&self, shipment_id: &str) -> ShipmentHistory {
        self.inner
            .state
            .read()
            .get_shipment_history(shipment_id)
            .clone()
    }

    /// Number of checkpoints recorded for `shipment_id`
    pub fn get_checkpoint_count(&self, shipment_id: &str) -> usize {
        self.inner.state.read().get_checkpoint_count(shipment_id)
    }

    /// Copy of the latest checkpoint of `shipment_id`
    pub fn latest_checkpoint(&self, shipment_id: &str) -> Option<Checkpoint> {
        self.inner
            .state
            .read()
            .latest_checkpoint(shipment_id)
            .cloned()
    }

    /// Shipments with at least one checkpoint, sorted
    pub fn shipment_ids(&self) -> Vec<String> {
        self.inner.state.read().shipment_ids()
    }

    /// Number of shipments by latest status
    pub fn status_distribution(&self) -> BTreeMap<String, usize> {
        self.inner.state.read().status_distribution()
    }

    /// Sequence number of the last fully dispatched event
    pub fn last_sequence(&self) -> u64 {
        self.inner.published.load(Ordering::Acquire)
    }

    /// Run `f` against the ledger under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&CheckpointLedger<RoleRegistry<P>, C>) -> R) -> R {
        f(&self.inner.state.read())
    }
}

impl<P: AdminPolicy + Clone, C: PhysicalClock> SharedLedger<P, C> {
    /// Consistent copy of the ledger state
    pub fn snapshot(&self) -> LedgerSnapshot<P> {
        self.inner.state.read().snapshot()
    }
}

impl<P, C> std::fmt::Debug for SharedLedger<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLedger").finish_non_exhaustive()
    }
}
